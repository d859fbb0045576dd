/// Report run orchestration.
///
/// One run:
/// 1. For each configured site, in order, query recent overflows on its
///    watercourses (fatal on failure)
/// 2. Reduce the records to band totals and classify risk
/// 3. Fetch the rain outlook for the site (non-fatal on failure)
/// 4. Once every site succeeded, render all pages and write them
///
/// Sites are processed strictly one after another; the per-site results
/// are collected into a `Vec<SiteReport>` and handed to the renderer once.

use chrono::{DateTime, Utc};
use std::error::Error;
use tracing::info;

use crate::analysis::bands::aggregate_with_summary;
use crate::analysis::risk::classify;
use crate::config::RunConfig;
use crate::ingest::{forecast, overflow};
use crate::model::{DischargeRecord, OverflowError, PrecipitationWarning};
use crate::report::{self, RenderedReport, SiteReport};
use crate::sites::Site;

const USER_AGENT: &str = concat!("overflow_watch/", env!("CARGO_PKG_VERSION"));

/// Pure reduction of one site's fetched data into a report.
pub fn build_site_report(
    site: &Site,
    records: &[DischargeRecord],
    warnings: Vec<PrecipitationWarning>,
) -> SiteReport {
    let (totals, summary) = aggregate_with_summary(records, site);
    SiteReport {
        site: site.clone(),
        totals,
        summary,
        risk: classify(&totals),
        warnings,
    }
}

/// Whether a failed `ReportRunner::run` may have left some output files
/// written. Only failures raised while writing can; fetch failures abort
/// before anything touches the output directory.
pub fn output_may_be_partial(err: &(dyn Error + 'static)) -> bool {
    matches!(
        err.downcast_ref::<OverflowError>(),
        Some(OverflowError::OutputError(_))
    )
}

/// Runs the full report for a set of sites.
pub struct ReportRunner {
    config: RunConfig,
    sites: Vec<Site>,
    client: reqwest::blocking::Client,
}

impl ReportRunner {
    pub fn new(config: RunConfig, sites: Vec<Site>) -> Result<Self, OverflowError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| OverflowError::RequestFailed(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self { config, sites, client })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Fetches and evaluates a single site.
    pub fn process_site(&self, site: &Site, now: DateTime<Utc>) -> Result<SiteReport, OverflowError> {
        let records = overflow::fetch_discharges(
            &self.client,
            &self.config.overflow_api_url,
            &site.watercourse_refs(),
            now,
            self.config.window_hours,
            self.config.max_records,
        )?;

        let warnings = if self.config.skip_forecast {
            Vec::new()
        } else {
            forecast::fetch_warnings(&self.client, &self.config, site)
        };

        let report = build_site_report(site, &records, warnings);
        info!(
            site = %site.slug,
            risk = %report.risk,
            records = records.len(),
            warnings = report.warnings.len(),
            "site processed"
        );
        Ok(report)
    }

    /// Processes every site in order, stopping at the first fatal error.
    pub fn collect_reports(&self, now: DateTime<Utc>) -> Result<Vec<SiteReport>, OverflowError> {
        self.sites
            .iter()
            .map(|site| self.process_site(site, now))
            .collect()
    }

    /// Full run: fetch, evaluate, render and write. Nothing is written
    /// unless every site's overflow query succeeded.
    pub fn run(&self, now: DateTime<Utc>) -> Result<Vec<SiteReport>, Box<dyn Error>> {
        let reports = self.collect_reports(now)?;
        let rendered: RenderedReport = report::render_all(&reports, now);
        report::write_outputs(&self.config.output_dir, &rendered)?;

        info!(
            files = rendered.files.len(),
            dir = %self.config.output_dir.display(),
            "report written"
        );
        Ok(reports)
    }
}
