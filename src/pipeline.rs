//! One run, start to finish.
//!
//! ```text
//! Start → QuoteSelected → BackgroundAcquired → Composed → Uploaded → Notified
//! ```
//!
//! Composition and upload are the only steps that can end a run early. The
//! history log stays locked for the whole run and is appended to only after
//! the upload succeeds.

use std::fmt;

use crate::background;
use crate::compose::{self, typeface};
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::PostError;
use crate::history::HistoryLog;
use crate::ports::notifier::Announcement;
use crate::publish::{self, UPLOAD_POLICY};
use crate::selector::{self, SelectedQuote, QUOTE_POLICY};

/// Where a run is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Nothing done yet.
    Start,
    /// A quote has been chosen.
    QuoteSelected,
    /// A background (photo or fallback) is in hand.
    BackgroundAcquired,
    /// The artifact has been written.
    Composed,
    /// The artifact is public.
    Uploaded,
    /// Sinks have been told.
    Notified,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::QuoteSelected => "quote selected",
            Self::BackgroundAcquired => "background acquired",
            Self::Composed => "composed",
            Self::Uploaded => "uploaded",
            Self::Notified => "notified",
        };
        f.write_str(name)
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// Uploaded and announced.
    Published {
        /// The quote that went out.
        quote: String,
        /// Public URL of the image.
        url: String,
        /// Sinks that accepted the announcement.
        delivered: Vec<String>,
    },
    /// Composed only, because of `--dry-run`.
    DryRun {
        /// The quote that would have gone out.
        quote: String,
    },
    /// Stopped early; history untouched.
    Aborted {
        /// Last stage reached before the failure.
        reached: Stage,
        /// What went wrong.
        reason: PostError,
    },
}

/// Execute one run.
///
/// # Errors
///
/// Returns an error only when the history log cannot be opened or locked.
/// Compose and upload failures are reported through [`RunOutcome::Aborted`];
/// a history append failing after upload is logged and the run still counts
/// as published.
pub async fn run(ctx: &ServiceContext, settings: &Settings) -> Result<RunOutcome, PostError> {
    let mut history = HistoryLog::open(&settings.history_path)?;
    let mut stage = Stage::Start;
    tracing::debug!(%stage, history = history.len(), "run started");

    let quote = selector::select_quote(
        ctx.quotes.as_ref(),
        |q| history.contains(q),
        &settings.default_quote,
        QUOTE_POLICY,
    )
    .await;
    stage = Stage::QuoteSelected;
    tracing::debug!(%stage, default = quote.is_default, "quote ready");

    let background = background::acquire(ctx.photos.as_deref(), &settings.search_query).await;
    stage = Stage::BackgroundAcquired;
    tracing::debug!(%stage, source = ?background.source, "background ready");

    let face = typeface::acquire(ctx.fonts.as_deref(), &settings.font_cache).await;
    let composed = compose::render(&quote.text, &settings.author, &background.image, &face)
        .and_then(|canvas| {
            compose::save_jpeg(&canvas, &settings.output_path, compose::JPEG_QUALITY)
        });
    if let Err(reason) = composed {
        tracing::error!(%stage, "image creation failed: {reason}");
        return Ok(RunOutcome::Aborted { reached: stage, reason });
    }
    stage = Stage::Composed;
    tracing::info!(%stage, path = %settings.output_path.display(), "post image written");

    if settings.dry_run {
        tracing::info!("dry run: not uploading, history unchanged");
        return Ok(RunOutcome::DryRun { quote: quote.text });
    }

    let url = match publish::upload(ctx.host.as_ref(), &settings.output_path, UPLOAD_POLICY).await
    {
        Ok(url) => url,
        Err(reason) => {
            tracing::error!(%stage, "upload failed: {reason}");
            return Ok(RunOutcome::Aborted { reached: stage, reason });
        }
    };
    stage = Stage::Uploaded;
    tracing::info!(%stage, %url, "post uploaded");

    let announcement = Announcement { url: url.clone(), caption: settings.caption.clone() };
    let report = publish::notify(&ctx.sinks, &announcement).await;
    stage = Stage::Notified;
    tracing::debug!(%stage, delivered = report.delivered.len(), failed = report.failed.len());

    remember(&mut history, &quote);

    Ok(RunOutcome::Published { quote: quote.text, url, delivered: report.delivered })
}

/// Record the published quote. The post is already public, so a failed
/// append is logged rather than turning the run into a failure.
fn remember(history: &mut HistoryLog, quote: &SelectedQuote) -> bool {
    if quote.is_default && history.contains(&quote.text) {
        tracing::debug!("default quote already recorded");
        return true;
    }
    match history.append(&quote.text) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(quote = %quote.text, "post is public but history was not updated: {e}");
            false
        }
    }
}
