//! Link creation, inspection and redirect service.

use std::fmt;
use std::sync::Arc;

use chrono::{TimeDelta, Utc};

use crate::domain::access_log::HISTORY_WINDOW;
use crate::domain::entities::{AccessRecord, LinkDetails, LinkRecord};
use crate::domain::log_event::STACK;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::logging::LogShipper;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_validator::validate_url;

/// Validity applied when the caller doesn't provide one.
pub const DEFAULT_VALIDITY_MINUTES: f64 = 30.0;

/// Longest accepted validity (100 years).
pub const MAX_VALIDITY_MINUTES: f64 = 100.0 * 365.0 * 24.0 * 60.0;

/// Generation attempts before giving up with an internal error.
const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Requested link lifetime as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Validity {
    Minutes(f64),
    /// A value that is not a number at all; carries its textual form.
    Malformed(String),
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validity::Minutes(minutes) => write!(f, "{minutes}"),
            Validity::Malformed(raw) => f.write_str(raw),
        }
    }
}

/// Input for [`LinkService::create_short_link`].
#[derive(Debug, Clone, Default)]
pub struct NewLinkRequest {
    pub url: Option<String>,
    /// Lifetime of the link; [`DEFAULT_VALIDITY_MINUTES`] when `None`.
    pub validity: Option<Validity>,
    pub custom_code: Option<String>,
}

/// Service orchestrating code generation, the link registry and access
/// recording.
///
/// Every step ships a log event through the [`LogShipper`]; shipping runs in
/// the background and never changes the outcome of an operation.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    logger: LogShipper,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, logger: LogShipper) -> Self {
        Self {
            link_repository,
            logger,
        }
    }

    pub fn logger(&self) -> &LogShipper {
        &self.logger
    }

    /// Creates a short link.
    ///
    /// All validation happens before the registry is touched, so a failed
    /// call never leaves a partial record behind.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - URL is missing or not an absolute URL
    /// - Validity is not a positive number of minutes (or is too large)
    /// - Custom code fails the format rule
    ///
    /// Returns [`AppError::Conflict`] if the custom code is already registered.
    ///
    /// Returns [`AppError::Internal`] if no free code is found within the
    /// generation attempt limit.
    pub async fn create_short_link(&self, request: NewLinkRequest) -> Result<LinkRecord, AppError> {
        let result = self.create(request).await;
        self.report_internal("api", "URL shortening failed", result)
    }

    async fn create(&self, request: NewLinkRequest) -> Result<LinkRecord, AppError> {
        self.logger
            .info(STACK, "api", "URL shortening request started");

        let Some(url) = request.url.filter(|u| !u.is_empty()) else {
            self.logger.error(STACK, "handler", "Missing URL in request");
            return Err(AppError::bad_request("URL is required"));
        };

        if validate_url(&url).is_err() {
            self.logger
                .error(STACK, "handler", format!("Invalid URL format: {url}"));
            return Err(AppError::bad_request("Invalid URL format"));
        }

        let requested = request
            .validity
            .unwrap_or(Validity::Minutes(DEFAULT_VALIDITY_MINUTES));
        let validity = match &requested {
            Validity::Minutes(minutes) => validity_from_minutes(*minutes),
            Validity::Malformed(_) => Err(AppError::bad_request(
                "Validity must be a positive number",
            )),
        }
        .inspect_err(|_| {
            self.logger.error(
                STACK,
                "handler",
                format!("Invalid validity minutes: {requested}"),
            );
        })?;

        let custom_code = request.custom_code.filter(|c| !c.is_empty());

        let link = if let Some(custom) = custom_code {
            self.insert_with_custom_code(custom, url, validity).await?
        } else {
            self.insert_with_generated_code(url, validity).await?
        };

        metrics::counter!("links_created_total").increment(1);
        self.logger.info(
            STACK,
            "api",
            format!(
                "URL shortened successfully: {} -> {}",
                link.code, link.original_url
            ),
        );

        Ok(link)
    }

    async fn insert_with_custom_code(
        &self,
        code: String,
        url: String,
        validity: TimeDelta,
    ) -> Result<LinkRecord, AppError> {
        if let Err(e) = validate_custom_code(&code) {
            self.logger.error(
                STACK,
                "handler",
                format!("Invalid custom shortcode format: {code}"),
            );
            return Err(e);
        }

        if self.link_repository.contains(&code).await? {
            return Err(self.custom_code_conflict(&code));
        }

        let link = build_link(code, url, validity)?;

        match self.link_repository.insert(link.clone()).await {
            Ok(()) => {}
            Err(AppError::Conflict { .. }) => return Err(self.custom_code_conflict(&link.code)),
            Err(e) => return Err(e),
        }

        self.logger.info(
            STACK,
            "handler",
            format!("Using custom shortcode: {}", link.code),
        );

        Ok(link)
    }

    fn custom_code_conflict(&self, code: &str) -> AppError {
        self.logger.error(
            STACK,
            "handler",
            format!("Shortcode collision detected: {code}"),
        );
        AppError::conflict("Custom shortcode already exists")
    }

    /// Generates codes until one is free and inserted.
    ///
    /// A code that loses an insert race to a concurrent request is treated
    /// like any other collision.
    async fn insert_with_generated_code(
        &self,
        url: String,
        validity: TimeDelta,
    ) -> Result<LinkRecord, AppError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let code = generate_code();

            if self.link_repository.contains(&code).await? {
                continue;
            }

            let link = build_link(code, url.clone(), validity)?;

            match self.link_repository.insert(link.clone()).await {
                Ok(()) => {
                    self.logger.info(
                        STACK,
                        "handler",
                        format!("Generated shortcode: {}", link.code),
                    );
                    return Ok(link);
                }
                Err(AppError::Conflict { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal("Failed to generate unique shortcode"))
    }

    /// Returns a live link with its last [`HISTORY_WINDOW`] accesses.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes and [`AppError::Gone`]
    /// for expired ones.
    pub async fn get_link_details(&self, code: &str) -> Result<LinkDetails, AppError> {
        let result = self.inspect(code).await;
        self.report_internal("api", "Stats retrieval failed", result)
    }

    async fn inspect(&self, code: &str) -> Result<LinkDetails, AppError> {
        self.logger
            .info(STACK, "api", format!("Stats request for shortcode: {code}"));

        let details = match self
            .link_repository
            .get_with_history(code, HISTORY_WINDOW)
            .await
        {
            Ok(details) => details,
            Err(AppError::NotFound { .. }) => {
                self.logger
                    .warn(STACK, "handler", format!("Shortcode not found: {code}"));
                return Err(AppError::not_found("Shortcode not found"));
            }
            Err(e) => return Err(e),
        };

        if details.link.is_expired() {
            self.logger.warn(
                STACK,
                "handler",
                format!("Expired shortcode accessed: {code}"),
            );
            return Err(AppError::gone("Shortened URL has expired"));
        }

        Ok(details)
    }

    /// Records an access on a live link and returns the URL to redirect to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes and [`AppError::Gone`]
    /// for expired ones; nothing is recorded in either case.
    pub async fn resolve_redirect(
        &self,
        code: &str,
        client_agent: Option<String>,
        client_address: Option<String>,
    ) -> Result<String, AppError> {
        let result = self.redirect(code, client_agent, client_address).await;
        self.report_internal(
            "redirect",
            &format!("Redirect failed for shortcode {code}"),
            result,
        )
    }

    async fn redirect(
        &self,
        code: &str,
        client_agent: Option<String>,
        client_address: Option<String>,
    ) -> Result<String, AppError> {
        self.logger.info(
            STACK,
            "redirect",
            format!("Redirect request for shortcode: {code}"),
        );

        let link = match self.link_repository.get(code).await {
            Ok(link) => link,
            Err(AppError::NotFound { .. }) => {
                self.logger.warn(
                    STACK,
                    "handler",
                    format!("Redirect attempted for non-existent shortcode: {code}"),
                );
                return Err(AppError::not_found("Shortcode not found"));
            }
            Err(e) => return Err(e),
        };

        if link.is_expired() {
            self.logger.warn(
                STACK,
                "handler",
                format!("Redirect attempted for expired shortcode: {code}"),
            );
            return Err(AppError::gone("Shortened URL has expired"));
        }

        let access = AccessRecord::new(client_agent, client_address);

        // The record was just read and links are never removed, so a miss
        // here is an invariant violation rather than a client error.
        self.link_repository
            .record_access(code, access)
            .await
            .map_err(|e| match e {
                AppError::NotFound { .. } => {
                    AppError::internal("Link disappeared while recording access")
                }
                other => other,
            })?;

        metrics::counter!("redirects_total").increment(1);
        self.logger.info(
            STACK,
            "redirect",
            format!("Successful redirect: {code} -> {}", link.original_url),
        );

        Ok(link.original_url)
    }

    /// Number of registered links, expired ones included.
    pub async fn total_links(&self) -> Result<usize, AppError> {
        self.link_repository.count().await
    }

    /// Constructs the full short URL from a base (`scheme://host[:port]`) and code.
    pub fn get_short_url(&self, base: &str, code: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), code)
    }

    fn report_internal<T>(
        &self,
        package: &str,
        context: &str,
        result: Result<T, AppError>,
    ) -> Result<T, AppError> {
        if let Err(err @ AppError::Internal { .. }) = &result {
            self.logger
                .fatal(STACK, package, format!("{context}: {err}"));
        }
        result
    }
}

/// Converts a validity in minutes into a duration.
///
/// Fractional minutes are allowed; the result is rounded to milliseconds and
/// is at least one millisecond so that `expires_at > created_at` holds.
fn validity_from_minutes(minutes: f64) -> Result<TimeDelta, AppError> {
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(AppError::bad_request("Validity must be a positive number"));
    }

    if minutes > MAX_VALIDITY_MINUTES {
        return Err(AppError::bad_request("Validity is too large"));
    }

    let millis = (minutes * 60_000.0).round().max(1.0) as i64;

    TimeDelta::try_milliseconds(millis)
        .ok_or_else(|| AppError::bad_request("Validity is too large"))
}

fn build_link(code: String, url: String, validity: TimeDelta) -> Result<LinkRecord, AppError> {
    LinkRecord::new(code, url, Utc::now(), validity)
        .ok_or_else(|| AppError::internal("Failed to compute expiry timestamp"))
}
