//! Pure view pipeline: filtering, ranking, lookups, and aggregate analytics.
//!
//! Nothing in this module touches the UI; every function takes the shared
//! dataset by reference and returns plain data, so the whole pipeline is
//! testable without a rendering context.

use std::collections::BTreeMap;

use super::model::{Dataset, Demographic, SchoolRecord, SchoolType};

/// Maximum number of rows the rankings view shows.
pub const RANKING_PAGE_SIZE: usize = 50;

/// Number of equal-width bins in the admit-rate histogram.
pub const HISTOGRAM_BINS: usize = 20;

const TOP_SCHOOLS: usize = 10;
const TOP_CITIES: usize = 10;
const MIN_CITY_SCHOOLS: usize = 2;

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

/// Filter selections for the rankings view. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingFilter {
    pub campus: Option<String>,
    pub school_type: Option<SchoolType>,
    pub city: Option<String>,
}

impl RankingFilter {
    fn matches(&self, rec: &SchoolRecord) -> bool {
        if let Some(campus) = &self.campus {
            if rec.college != *campus {
                return false;
            }
        }
        if let Some(school_type) = self.school_type {
            if rec.school_type != school_type {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if rec.city != *city {
                return false;
            }
        }
        true
    }
}

/// Aggregates over the ranking page. Computed after truncation, i.e. these
/// describe the schools actually shown, not every filter match.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RankingSummary {
    pub shown: usize,
    pub mean_admit_rate: f64,
    pub total_applied: u64,
    pub total_admitted: u64,
}

#[derive(Debug, Default)]
pub struct RankingPage<'a> {
    pub records: Vec<&'a SchoolRecord>,
    pub summary: RankingSummary,
}

/// Filter, rank, and cap the record set for the rankings view.
///
/// The sort is a stable descending sort on admit rate, so records with equal
/// rates keep their source order and the result is deterministic.
pub fn rank_schools<'a>(dataset: &'a Dataset, filter: &RankingFilter) -> RankingPage<'a> {
    let mut records: Vec<&SchoolRecord> = dataset
        .records
        .iter()
        .filter(|rec| filter.matches(rec))
        .collect();

    records.sort_by(|a, b| b.admit_rate.total_cmp(&a.admit_rate));
    records.truncate(RANKING_PAGE_SIZE);

    RankingPage {
        summary: summarize(&records),
        records,
    }
}

fn summarize(records: &[&SchoolRecord]) -> RankingSummary {
    let shown = records.len();
    let mean_admit_rate = if shown == 0 {
        0.0
    } else {
        records.iter().map(|r| r.admit_rate).sum::<f64>() / shown as f64
    };
    RankingSummary {
        shown,
        mean_admit_rate,
        total_applied: records.iter().map(|r| u64::from(r.applied)).sum(),
        total_admitted: records.iter().map(|r| u64::from(r.admitted)).sum(),
    }
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// Look up the record for a (school, campus) pair. First match wins if the
/// source carries duplicate keys.
pub fn find_school<'a>(
    dataset: &'a Dataset,
    school: &str,
    campus: &str,
) -> Option<&'a SchoolRecord> {
    dataset
        .records
        .iter()
        .find(|r| r.school == school && r.college == campus)
}

/// One row of the detail view's demographic table.
#[derive(Debug, Clone, PartialEq)]
pub struct DemographicRow {
    pub group: Demographic,
    pub applied: u32,
    pub admitted: u32,
    pub admit_rate: f64,
}

/// Demographic table rows; groups nobody applied from are omitted.
pub fn demographic_rows(rec: &SchoolRecord) -> Vec<DemographicRow> {
    rec.demographics()
        .filter(|(_, stats)| stats.applied > 0)
        .map(|(group, stats)| DemographicRow {
            group,
            applied: stats.applied,
            admitted: stats.admitted,
            admit_rate: stats.admit_rate,
        })
        .collect()
}

/// Admit rate per demographic group with zero rates dropped (bar chart
/// input). Empty when the school reports no per-group rates at all.
pub fn demo_rate_series(rec: &SchoolRecord) -> Vec<(Demographic, f64)> {
    rec.demographics()
        .filter(|(_, stats)| stats.admit_rate > 0.0)
        .map(|(group, stats)| (group, stats.admit_rate))
        .collect()
}

/// Application count per demographic group with zero counts dropped
/// (share chart input).
pub fn demo_applied_series(rec: &SchoolRecord) -> Vec<(Demographic, u32)> {
    rec.demographics()
        .filter(|(_, stats)| stats.applied > 0)
        .map(|(group, stats)| (group, stats.applied))
        .collect()
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Resolve the comparison selection to records, dropping names that do not
/// resolve. Under a campus filter the (school, campus) pair is looked up;
/// with no campus the first record for that school name wins, whichever
/// campus it reports. The caller shows the resolved campus so that
/// ambiguity stays visible.
pub fn resolve_comparison<'a>(
    dataset: &'a Dataset,
    campus: Option<&str>,
    names: &[String],
) -> Vec<&'a SchoolRecord> {
    names
        .iter()
        .filter_map(|name| match campus {
            Some(campus) => find_school(dataset, name, campus),
            None => dataset.records.iter().find(|r| r.school == *name),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeStats {
    pub school_type: SchoolType,
    /// Deduplicated school count.
    pub schools: usize,
    pub mean_admit_rate: f64,
    pub total_applied: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityStats {
    pub city: String,
    /// Deduplicated school count.
    pub schools: usize,
    pub mean_admit_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Headline {
    /// Deduplicated school count over the filtered subset.
    pub schools: usize,
    /// Mean/max/min admit rate over the non-deduplicated subset.
    pub mean_admit_rate: f64,
    pub max_admit_rate: f64,
    pub min_admit_rate: f64,
}

#[derive(Debug)]
pub struct AnalyticsReport<'a> {
    /// Top schools by admit rate, per (school, campus) pair.
    pub top_schools: Vec<&'a SchoolRecord>,
    pub histogram: Vec<HistogramBin>,
    pub by_type: Vec<TypeStats>,
    pub by_city: Vec<CityStats>,
    pub demo_averages: Vec<(Demographic, f64)>,
    pub headline: Headline,
}

/// Aggregate analytics over the campus-filtered subset. `None` when the
/// filter matches nothing.
///
/// Per-school aggregates (type and city distributions, headline school
/// count) run on a deduplicated set that keeps only the best-rate record
/// per school name, so a school reporting to several campuses is not
/// counted twice. Ranking-style outputs (top schools, histogram, rate
/// statistics) stay per (school, campus) pair.
pub fn campus_analytics<'a>(
    dataset: &'a Dataset,
    campus: Option<&str>,
) -> Option<AnalyticsReport<'a>> {
    let subset: Vec<&SchoolRecord> = dataset
        .records
        .iter()
        .filter(|r| campus.map_or(true, |c| r.college == c))
        .collect();
    if subset.is_empty() {
        return None;
    }

    let unique = dedup_by_school(&subset);
    let rates: Vec<f64> = subset.iter().map(|r| r.admit_rate).collect();

    Some(AnalyticsReport {
        top_schools: top_by_rate(&subset, TOP_SCHOOLS),
        histogram: rate_histogram(&rates, HISTOGRAM_BINS),
        by_type: type_stats(&unique),
        by_city: city_stats(&unique),
        demo_averages: demographic_averages(&subset),
        headline: headline(&subset, unique.len()),
    })
}

/// Keep the best-rate record per school name so multi-campus schools are not
/// double counted in per-school aggregates. The first occurrence wins ties,
/// and first-seen order is preserved.
pub fn dedup_by_school<'a>(records: &[&'a SchoolRecord]) -> Vec<&'a SchoolRecord> {
    let mut best: Vec<&SchoolRecord> = Vec::new();
    let mut slot_by_name: BTreeMap<&str, usize> = BTreeMap::new();

    for &rec in records {
        match slot_by_name.get(rec.school.as_str()) {
            Some(&slot) => {
                if rec.admit_rate > best[slot].admit_rate {
                    best[slot] = rec;
                }
            }
            None => {
                slot_by_name.insert(&rec.school, best.len());
                best.push(rec);
            }
        }
    }
    best
}

fn top_by_rate<'a>(subset: &[&'a SchoolRecord], n: usize) -> Vec<&'a SchoolRecord> {
    let mut sorted = subset.to_vec();
    sorted.sort_by(|a, b| b.admit_rate.total_cmp(&a.admit_rate));
    sorted.truncate(n);
    sorted
}

/// Bucket rates into `bins` equal-width bins spanning the observed range.
/// The maximum value lands in the last bin; a degenerate zero-width range
/// collapses to a single bin.
pub fn rate_histogram(rates: &[f64], bins: usize) -> Vec<HistogramBin> {
    if rates.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = rates.iter().copied().fold(f64::INFINITY, f64::min);
    let max = rates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;

    if width <= 0.0 {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: rates.len(),
        }];
    }

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &rate in rates {
        let idx = (((rate - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

fn type_stats(unique: &[&SchoolRecord]) -> Vec<TypeStats> {
    [SchoolType::Public, SchoolType::Private]
        .into_iter()
        .filter_map(|school_type| {
            let group: Vec<&&SchoolRecord> = unique
                .iter()
                .filter(|r| r.school_type == school_type)
                .collect();
            if group.is_empty() {
                return None;
            }
            Some(TypeStats {
                school_type,
                schools: group.len(),
                mean_admit_rate: group.iter().map(|r| r.admit_rate).sum::<f64>()
                    / group.len() as f64,
                total_applied: group.iter().map(|r| u64::from(r.applied)).sum(),
            })
        })
        .collect()
}

fn city_stats(unique: &[&SchoolRecord]) -> Vec<CityStats> {
    let mut grouped: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for rec in unique {
        let entry = grouped.entry(&rec.city).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += rec.admit_rate;
    }

    let mut stats: Vec<CityStats> = grouped
        .into_iter()
        .filter(|(_, (count, _))| *count >= MIN_CITY_SCHOOLS)
        .map(|(city, (count, rate_sum))| CityStats {
            city: city.to_string(),
            schools: count,
            mean_admit_rate: rate_sum / count as f64,
        })
        .collect();

    stats.sort_by(|a, b| b.mean_admit_rate.total_cmp(&a.mean_admit_rate));
    stats.truncate(TOP_CITIES);
    stats
}

/// Mean admit rate per demographic group over records with a nonzero rate.
/// Zero is treated as "no data", not as an actual zero-percent rate, which
/// keeps unreported groups from dragging the average down. Groups with no
/// nonzero data anywhere are omitted.
pub fn demographic_averages(records: &[&SchoolRecord]) -> Vec<(Demographic, f64)> {
    Demographic::ALL
        .iter()
        .filter_map(|&group| {
            let mut sum = 0.0;
            let mut n = 0usize;
            for rec in records {
                let rate = rec.demographic(group).admit_rate;
                if rate > 0.0 {
                    sum += rate;
                    n += 1;
                }
            }
            (n > 0).then(|| (group, sum / n as f64))
        })
        .collect()
}

fn headline(subset: &[&SchoolRecord], unique_schools: usize) -> Headline {
    // Callers guarantee a non-empty subset.
    Headline {
        schools: unique_schools,
        mean_admit_rate: subset.iter().map(|r| r.admit_rate).sum::<f64>() / subset.len() as f64,
        max_admit_rate: subset
            .iter()
            .map(|r| r.admit_rate)
            .fold(f64::NEG_INFINITY, f64::max),
        min_admit_rate: subset
            .iter()
            .map(|r| r.admit_rate)
            .fold(f64::INFINITY, f64::min),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::stub_record;

    fn campus_filter(campus: &str) -> RankingFilter {
        RankingFilter {
            campus: Some(campus.to_string()),
            ..RankingFilter::default()
        }
    }

    #[test]
    fn ranking_filters_sorts_and_summarizes() {
        // The end-to-end scenario: A/85 and A/30 at different campuses,
        // B/45 alongside A/85 at CampusX.
        let mut a1 = stub_record("School A", "Irvine", "CampusX", SchoolType::Public, 85.0);
        a1.applied = 100;
        a1.admitted = 85;
        let mut b = stub_record("School B", "Irvine", "CampusX", SchoolType::Private, 45.0);
        b.applied = 200;
        b.admitted = 90;
        let a2 = stub_record("School A", "Irvine", "CampusY", SchoolType::Public, 30.0);
        let ds = Dataset::from_records(vec![b, a1, a2]);

        let page = rank_schools(&ds, &campus_filter("CampusX"));
        let names: Vec<(&str, f64)> = page
            .records
            .iter()
            .map(|r| (r.school.as_str(), r.admit_rate))
            .collect();
        assert_eq!(names, vec![("School A", 85.0), ("School B", 45.0)]);

        assert_eq!(page.summary.shown, 2);
        assert_eq!(page.summary.mean_admit_rate, 65.0);
        assert_eq!(page.summary.total_applied, 300);
        assert_eq!(page.summary.total_admitted, 175);
    }

    #[test]
    fn ranking_caps_at_page_size() {
        let records: Vec<_> = (0..RANKING_PAGE_SIZE + 10)
            .map(|i| {
                let city = if i < 5 { "Davis" } else { "Irvine" };
                stub_record(
                    &format!("School {i}"),
                    city,
                    "CampusX",
                    SchoolType::Public,
                    i as f64,
                )
            })
            .collect();
        let ds = Dataset::from_records(records);
        let page = rank_schools(&ds, &RankingFilter::default());
        assert_eq!(page.records.len(), RANKING_PAGE_SIZE);

        // Fewer matches than the cap returns exactly that many.
        let page = rank_schools(
            &ds,
            &RankingFilter {
                city: Some("Davis".to_string()),
                ..RankingFilter::default()
            },
        );
        assert_eq!(page.records.len(), 5);
    }

    #[test]
    fn ranking_tie_break_preserves_source_order() {
        let records = vec![
            stub_record("First", "Irvine", "CampusX", SchoolType::Public, 50.0),
            stub_record("Second", "Irvine", "CampusX", SchoolType::Public, 50.0),
            stub_record("Third", "Irvine", "CampusX", SchoolType::Public, 50.0),
            stub_record("Winner", "Irvine", "CampusX", SchoolType::Public, 60.0),
        ];
        let ds = Dataset::from_records(records);
        let page = rank_schools(&ds, &RankingFilter::default());
        let names: Vec<&str> = page.records.iter().map(|r| r.school.as_str()).collect();
        assert_eq!(names, vec!["Winner", "First", "Second", "Third"]);
    }

    #[test]
    fn empty_filter_result_summarizes_to_zeros() {
        let ds = Dataset::from_records(vec![stub_record(
            "School A",
            "Irvine",
            "CampusX",
            SchoolType::Public,
            85.0,
        )]);
        let page = rank_schools(&ds, &campus_filter("CampusZ"));
        assert!(page.records.is_empty());
        assert_eq!(page.summary.mean_admit_rate, 0.0);
        assert_eq!(page.summary.total_applied, 0);
        assert_eq!(page.summary.total_admitted, 0);
    }

    #[test]
    fn ranking_filters_by_type_and_city() {
        let ds = Dataset::from_records(vec![
            stub_record("A", "Irvine", "CampusX", SchoolType::Public, 80.0),
            stub_record("B", "Irvine", "CampusX", SchoolType::Private, 70.0),
            stub_record("C", "Davis", "CampusX", SchoolType::Public, 60.0),
        ]);
        let page = rank_schools(
            &ds,
            &RankingFilter {
                school_type: Some(SchoolType::Public),
                city: Some("Irvine".to_string()),
                ..RankingFilter::default()
            },
        );
        let names: Vec<&str> = page.records.iter().map(|r| r.school.as_str()).collect();
        assert_eq!(names, vec!["A"]);
    }

    #[test]
    fn find_school_takes_first_match() {
        let mut dup1 = stub_record("A", "Irvine", "CampusX", SchoolType::Public, 10.0);
        dup1.applied = 1;
        let mut dup2 = stub_record("A", "Irvine", "CampusX", SchoolType::Public, 20.0);
        dup2.applied = 2;
        let ds = Dataset::from_records(vec![dup1, dup2]);

        let rec = find_school(&ds, "A", "CampusX").expect("found");
        assert_eq!(rec.applied, 1);
        assert!(find_school(&ds, "A", "CampusY").is_none());
    }

    #[test]
    fn demographic_rows_skip_groups_without_applicants() {
        let mut rec = stub_record("A", "Irvine", "CampusX", SchoolType::Public, 50.0);
        rec.asian_applied = 40;
        rec.asian_admitted = 20;
        rec.asian_admit_rate = 50.0;
        rec.white_admit_rate = 80.0; // rate but no applicants

        let rows = demographic_rows(&rec);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].group, Demographic::Asian);

        // The rate series still carries White (nonzero rate), the applied
        // series does not (zero count).
        let rates = demo_rate_series(&rec);
        assert!(rates.iter().any(|(g, _)| *g == Demographic::White));
        let applied = demo_applied_series(&rec);
        assert_eq!(applied, vec![(Demographic::Asian, 40)]);
    }

    #[test]
    fn comparison_resolves_first_match_across_campuses() {
        let ds = Dataset::from_records(vec![
            stub_record("A", "Irvine", "CampusX", SchoolType::Public, 85.0),
            stub_record("A", "Irvine", "CampusY", SchoolType::Public, 30.0),
            stub_record("B", "Irvine", "CampusY", SchoolType::Private, 45.0),
        ]);

        let names = vec!["A".to_string(), "B".to_string(), "Missing".to_string()];
        let all = resolve_comparison(&ds, None, &names);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].college, "CampusX"); // first row wins under "All"

        let scoped = resolve_comparison(&ds, Some("CampusY"), &names);
        assert_eq!(scoped.len(), 2);
        assert_eq!(scoped[0].college, "CampusY");
    }

    #[test]
    fn dedup_keeps_best_rate_per_school() {
        let low = stub_record("A", "Irvine", "CampusX", SchoolType::Public, 55.0);
        let high = stub_record("A", "Irvine", "CampusY", SchoolType::Public, 80.0);
        let other = stub_record("B", "Irvine", "CampusX", SchoolType::Public, 40.0);
        let ds = Dataset::from_records(vec![low, high, other]);
        let refs: Vec<&SchoolRecord> = ds.records.iter().collect();

        let unique = dedup_by_school(&refs);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].school, "A");
        assert_eq!(unique[0].admit_rate, 80.0);
        assert_eq!(unique[1].school, "B");
    }

    #[test]
    fn demographic_average_ignores_zero_rates() {
        let mk = |rate: f64| {
            let mut rec = stub_record("A", "Irvine", "CampusX", SchoolType::Public, 50.0);
            rec.asian_admit_rate = rate;
            rec
        };
        let records = vec![mk(0.0), mk(0.0), mk(60.0), mk(80.0)];
        let refs: Vec<&SchoolRecord> = records.iter().collect();

        let averages = demographic_averages(&refs);
        assert_eq!(averages, vec![(Demographic::Asian, 70.0)]);
    }

    #[test]
    fn histogram_spans_range_with_max_in_last_bin() {
        let rates: Vec<f64> = (0..=100).map(|i| i as f64).collect();
        let bins = rate_histogram(&rates, HISTOGRAM_BINS);
        assert_eq!(bins.len(), HISTOGRAM_BINS);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[HISTOGRAM_BINS - 1].end, 100.0);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), rates.len());
        // 100.0 falls in the last bin, not past it.
        assert_eq!(bins[HISTOGRAM_BINS - 1].count, 6);
    }

    #[test]
    fn histogram_degenerate_range_collapses_to_one_bin() {
        let bins = rate_histogram(&[42.0, 42.0, 42.0], HISTOGRAM_BINS);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn analytics_dedups_and_aggregates() {
        let mut a1 = stub_record("School A", "Irvine", "CampusX", SchoolType::Public, 85.0);
        a1.applied = 100;
        let b = stub_record("School B", "Irvine", "CampusX", SchoolType::Private, 45.0);
        let a2 = stub_record("School A", "Irvine", "CampusY", SchoolType::Public, 30.0);
        let ds = Dataset::from_records(vec![a1, b, a2]);

        let report = campus_analytics(&ds, None).expect("non-empty");
        // School A appears at two campuses; dedup keeps the 85% row.
        assert_eq!(report.headline.schools, 2);
        assert_eq!(report.headline.max_admit_rate, 85.0);
        assert_eq!(report.headline.min_admit_rate, 30.0);

        let public = report
            .by_type
            .iter()
            .find(|t| t.school_type == SchoolType::Public)
            .expect("public stats");
        assert_eq!(public.schools, 1);
        assert_eq!(public.mean_admit_rate, 85.0);
        assert_eq!(public.total_applied, 100);

        // Top schools are per (school, campus) pair: all three rows rank.
        assert_eq!(report.top_schools.len(), 3);
        assert_eq!(report.top_schools[0].admit_rate, 85.0);
    }

    #[test]
    fn analytics_empty_subset_is_none() {
        let ds = Dataset::from_records(vec![stub_record(
            "A",
            "Irvine",
            "CampusX",
            SchoolType::Public,
            50.0,
        )]);
        assert!(campus_analytics(&ds, Some("CampusZ")).is_none());
    }

    #[test]
    fn city_stats_require_two_schools_and_rank_by_mean() {
        let records = vec![
            stub_record("A", "Irvine", "CampusX", SchoolType::Public, 80.0),
            stub_record("B", "Irvine", "CampusX", SchoolType::Public, 60.0),
            stub_record("C", "Davis", "CampusX", SchoolType::Public, 90.0),
            stub_record("D", "Fresno", "CampusX", SchoolType::Public, 95.0),
            stub_record("E", "Fresno", "CampusX", SchoolType::Public, 85.0),
        ];
        let ds = Dataset::from_records(records);
        let report = campus_analytics(&ds, None).expect("non-empty");

        // Davis has a single school and is excluded.
        let cities: Vec<(&str, usize)> = report
            .by_city
            .iter()
            .map(|c| (c.city.as_str(), c.schools))
            .collect();
        assert_eq!(cities, vec![("Fresno", 2), ("Irvine", 2)]);
        assert_eq!(report.by_city[0].mean_admit_rate, 90.0);
        assert_eq!(report.by_city[1].mean_admit_rate, 70.0);
    }
}
