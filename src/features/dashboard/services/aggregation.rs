//! Pure analytics over an incident snapshot.
//!
//! Every function works on a slice fetched for the current request; nothing
//! is cached between requests.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use crate::features::dashboard::dtos::{
    DashboardDto, LocationCountDto, RecentIncidentDto, StatusCountDto, StatusSliceDto,
    StatusSummaryDto, TimeRange, TrendPointDto, TypeShareDto,
};
use crate::features::incidents::models::{catalog, Incident, IncidentStatus, StatusTone};
use crate::shared::constants::{RECENT_INCIDENTS_LIMIT, TOP_LOCATIONS_LIMIT};

/// `count / total * 100` rounded to one decimal; 0.0 for an empty snapshot
pub fn percent(count: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Counts per key, in the order keys first appear
fn count_in_first_seen_order<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(&'a str, i64)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, i64)> = Vec::new();

    for key in keys {
        match index.get(key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((key, 1));
            }
        }
    }

    counts
}

pub fn status_summary(incidents: &[Incident]) -> StatusSummaryDto {
    let total = incidents.len() as i64;
    let (mut pending, mut investigating, mut resolved, mut other) = (0, 0, 0, 0);

    for incident in incidents {
        match incident.recognized_status() {
            Some(IncidentStatus::Pending) => pending += 1,
            Some(IncidentStatus::UnderInvestigation) => investigating += 1,
            Some(IncidentStatus::Resolved) => resolved += 1,
            None => other += 1,
        }
    }

    let card = |count| StatusCountDto {
        count,
        percent: percent(count, total),
    };

    StatusSummaryDto {
        total,
        pending: card(pending),
        under_investigation: card(investigating),
        resolved: card(resolved),
        other,
    }
}

/// Pie slices for recognised statuses with a non-zero count
pub fn status_slices(summary: &StatusSummaryDto) -> Vec<StatusSliceDto> {
    [
        (IncidentStatus::Pending, summary.pending),
        (
            IncidentStatus::UnderInvestigation,
            summary.under_investigation,
        ),
        (IncidentStatus::Resolved, summary.resolved),
    ]
    .into_iter()
    .filter(|(_, card)| card.count > 0)
    .map(|(status, card)| StatusSliceDto {
        status,
        count: card.count,
        percent: card.percent,
        tone: status.tone(),
    })
    .collect()
}

pub fn type_distribution(incidents: &[Incident]) -> Vec<TypeShareDto> {
    let total = incidents.len() as i64;

    count_in_first_seen_order(incidents.iter().map(|i| i.incident_type.as_str()))
        .into_iter()
        .map(|(incident_type, count)| TypeShareDto {
            incident_type: incident_type.to_string(),
            label: catalog::category_label(incident_type),
            count,
            percent: percent(count, total),
        })
        .collect()
}

/// Busiest locations first; equal counts keep first-seen order
pub fn top_locations(incidents: &[Incident], limit: usize) -> Vec<LocationCountDto> {
    let mut counts = count_in_first_seen_order(incidents.iter().map(|i| i.location.as_str()));
    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(limit)
        .map(|(location, count)| LocationCountDto {
            location: location.to_string(),
            count,
        })
        .collect()
}

pub fn within_range(
    incidents: &[Incident],
    range: TimeRange,
    now: DateTime<Utc>,
) -> Vec<&Incident> {
    match range.cutoff(now) {
        Some(cutoff) => incidents.iter().filter(|i| i.created_at >= cutoff).collect(),
        None => incidents.iter().collect(),
    }
}

/// Incidents per UTC day, oldest day first
pub fn trend_series(incidents: &[&Incident]) -> Vec<TrendPointDto> {
    let mut days: BTreeMap<String, i64> = BTreeMap::new();
    for incident in incidents {
        *days
            .entry(incident.created_at.format("%Y-%m-%d").to_string())
            .or_default() += 1;
    }

    days.into_iter()
        .map(|(date, count)| TrendPointDto { date, count })
        .collect()
}

pub fn recent_incidents(incidents: &[Incident], limit: usize) -> Vec<RecentIncidentDto> {
    let mut sorted: Vec<&Incident> = incidents.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    sorted
        .into_iter()
        .take(limit)
        .map(|i| RecentIncidentDto {
            id: i.id,
            title: i.title.clone(),
            incident_type: i.incident_type.clone(),
            incident_type_label: catalog::category_label(&i.incident_type),
            location: i.location.clone(),
            status: i.status.clone(),
            status_tone: StatusTone::for_status(&i.status),
            created_at: i.created_at,
        })
        .collect()
}

/// Every dashboard dataset; only the trend honours `range`
pub fn build_dashboard(
    incidents: &[Incident],
    range: TimeRange,
    now: DateTime<Utc>,
) -> DashboardDto {
    let summary = status_summary(incidents);

    DashboardDto {
        range,
        generated_at: now,
        status_chart: status_slices(&summary),
        summary,
        type_chart: type_distribution(incidents),
        location_chart: top_locations(incidents, TOP_LOCATIONS_LIMIT),
        trend: trend_series(&within_range(incidents, range, now)),
        recent: recent_incidents(incidents, RECENT_INCIDENTS_LIMIT),
    }
}
