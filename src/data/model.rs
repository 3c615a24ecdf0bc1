use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Rate classification
// ---------------------------------------------------------------------------

/// Three-tier classification of an admit rate (percent).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateTier {
    High,
    Medium,
    Low,
}

impl RateTier {
    /// `>= 70` is high, `>= 40` is medium, everything else (including
    /// negative input) is low.
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 70.0 {
            RateTier::High
        } else if rate >= 40.0 {
            RateTier::Medium
        } else {
            RateTier::Low
        }
    }
}

// ---------------------------------------------------------------------------
// School type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchoolType {
    Public,
    Private,
}

impl SchoolType {
    pub fn label(&self) -> &'static str {
        match self {
            SchoolType::Public => "Public",
            SchoolType::Private => "Private",
        }
    }
}

impl fmt::Display for SchoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for SchoolType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        // The source column is binary in practice; anything that is not
        // explicitly "Public" reads as Private.
        if raw.trim().eq_ignore_ascii_case("public") {
            Ok(SchoolType::Public)
        } else {
            Ok(SchoolType::Private)
        }
    }
}

// ---------------------------------------------------------------------------
// Demographic groups
// ---------------------------------------------------------------------------

/// The demographic groups the source reports per-group statistics for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Demographic {
    Asian,
    HispanicLatinx,
    White,
    AfricanAmerican,
    International,
    PacificIslander,
    AmericanIndian,
}

impl Demographic {
    pub const ALL: [Demographic; 7] = [
        Demographic::Asian,
        Demographic::HispanicLatinx,
        Demographic::White,
        Demographic::AfricanAmerican,
        Demographic::International,
        Demographic::PacificIslander,
        Demographic::AmericanIndian,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Demographic::Asian => "Asian",
            Demographic::HispanicLatinx => "Hispanic/Latinx",
            Demographic::White => "White",
            Demographic::AfricanAmerican => "African American",
            Demographic::International => "International",
            Demographic::PacificIslander => "Pacific Islander",
            Demographic::AmericanIndian => "American Indian",
        }
    }
}

impl fmt::Display for Demographic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-demographic admission statistics. All three values are stored
/// independently in the source; the rate is not derived from the counts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DemoStats {
    pub applied: u32,
    pub admitted: u32,
    pub admit_rate: f64,
}

// ---------------------------------------------------------------------------
// Lenient numeric coercion (serde deserializers)
// ---------------------------------------------------------------------------

/// Parse a count column: malformed, missing, or negative values become 0.
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v as u32)
        .unwrap_or(0))
}

/// Parse a rate column: malformed, missing, or negative values become 0.0.
pub(crate) fn lenient_rate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0))
}

// ---------------------------------------------------------------------------
// SchoolRecord – one row of the source table
// ---------------------------------------------------------------------------

/// One (high school, UC campus) admission-statistics pair.
///
/// Field names mirror the source CSV columns. Numeric columns are coerced
/// leniently: a missing column, a blank cell, or a value like "N/A" loads
/// as zero rather than failing the row. The admit rate is taken at face
/// value; nothing enforces `admitted <= applied` or rate consistency.
#[derive(Debug, Clone, Deserialize)]
pub struct SchoolRecord {
    #[serde(rename = "School")]
    pub school: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "County")]
    pub county: String,
    /// UC campus this row reports admissions to.
    #[serde(rename = "College")]
    pub college: String,
    #[serde(rename = "Private_Public")]
    pub school_type: SchoolType,

    #[serde(rename = "Applied", default, deserialize_with = "lenient_count")]
    pub applied: u32,
    #[serde(rename = "Admitted", default, deserialize_with = "lenient_count")]
    pub admitted: u32,
    #[serde(rename = "Enrolled", default, deserialize_with = "lenient_count")]
    pub enrolled: u32,
    #[serde(rename = "Admit_Rate_%", default, deserialize_with = "lenient_rate")]
    pub admit_rate: f64,

    #[serde(rename = "Asian_Applied", default, deserialize_with = "lenient_count")]
    pub asian_applied: u32,
    #[serde(rename = "Asian_Admitted", default, deserialize_with = "lenient_count")]
    pub asian_admitted: u32,
    #[serde(rename = "Asian_Admit_Rate_%", default, deserialize_with = "lenient_rate")]
    pub asian_admit_rate: f64,

    #[serde(rename = "Hispanic_Latinx_Applied", default, deserialize_with = "lenient_count")]
    pub hispanic_latinx_applied: u32,
    #[serde(rename = "Hispanic_Latinx_Admitted", default, deserialize_with = "lenient_count")]
    pub hispanic_latinx_admitted: u32,
    #[serde(rename = "Hispanic_Latinx_Admit_Rate_%", default, deserialize_with = "lenient_rate")]
    pub hispanic_latinx_admit_rate: f64,

    #[serde(rename = "White_Applied", default, deserialize_with = "lenient_count")]
    pub white_applied: u32,
    #[serde(rename = "White_Admitted", default, deserialize_with = "lenient_count")]
    pub white_admitted: u32,
    #[serde(rename = "White_Admit_Rate_%", default, deserialize_with = "lenient_rate")]
    pub white_admit_rate: f64,

    #[serde(rename = "African_American_Applied", default, deserialize_with = "lenient_count")]
    pub african_american_applied: u32,
    #[serde(rename = "African_American_Admitted", default, deserialize_with = "lenient_count")]
    pub african_american_admitted: u32,
    #[serde(rename = "African_American_Admit_Rate_%", default, deserialize_with = "lenient_rate")]
    pub african_american_admit_rate: f64,

    #[serde(rename = "International_Applied", default, deserialize_with = "lenient_count")]
    pub international_applied: u32,
    #[serde(rename = "International_Admitted", default, deserialize_with = "lenient_count")]
    pub international_admitted: u32,
    #[serde(rename = "International_Admit_Rate_%", default, deserialize_with = "lenient_rate")]
    pub international_admit_rate: f64,

    #[serde(rename = "Pacific_Islander_Applied", default, deserialize_with = "lenient_count")]
    pub pacific_islander_applied: u32,
    #[serde(rename = "Pacific_Islander_Admitted", default, deserialize_with = "lenient_count")]
    pub pacific_islander_admitted: u32,
    #[serde(rename = "Pacific_Islander_Admit_Rate_%", default, deserialize_with = "lenient_rate")]
    pub pacific_islander_admit_rate: f64,

    #[serde(rename = "American_Indian_Applied", default, deserialize_with = "lenient_count")]
    pub american_indian_applied: u32,
    #[serde(rename = "American_Indian_Admitted", default, deserialize_with = "lenient_count")]
    pub american_indian_admitted: u32,
    #[serde(rename = "American_Indian_Admit_Rate_%", default, deserialize_with = "lenient_rate")]
    pub american_indian_admit_rate: f64,
}

impl SchoolRecord {
    pub fn rate_tier(&self) -> RateTier {
        RateTier::from_rate(self.admit_rate)
    }

    /// Statistics for one demographic group.
    pub fn demographic(&self, group: Demographic) -> DemoStats {
        match group {
            Demographic::Asian => DemoStats {
                applied: self.asian_applied,
                admitted: self.asian_admitted,
                admit_rate: self.asian_admit_rate,
            },
            Demographic::HispanicLatinx => DemoStats {
                applied: self.hispanic_latinx_applied,
                admitted: self.hispanic_latinx_admitted,
                admit_rate: self.hispanic_latinx_admit_rate,
            },
            Demographic::White => DemoStats {
                applied: self.white_applied,
                admitted: self.white_admitted,
                admit_rate: self.white_admit_rate,
            },
            Demographic::AfricanAmerican => DemoStats {
                applied: self.african_american_applied,
                admitted: self.african_american_admitted,
                admit_rate: self.african_american_admit_rate,
            },
            Demographic::International => DemoStats {
                applied: self.international_applied,
                admitted: self.international_admitted,
                admit_rate: self.international_admit_rate,
            },
            Demographic::PacificIslander => DemoStats {
                applied: self.pacific_islander_applied,
                admitted: self.pacific_islander_admitted,
                admit_rate: self.pacific_islander_admit_rate,
            },
            Demographic::AmericanIndian => DemoStats {
                applied: self.american_indian_applied,
                admitted: self.american_indian_admitted,
                admit_rate: self.american_indian_admit_rate,
            },
        }
    }

    /// Iterate over all demographic groups with their statistics.
    pub fn demographics(&self) -> impl Iterator<Item = (Demographic, DemoStats)> + '_ {
        Demographic::ALL.iter().map(move |&g| (g, self.demographic(g)))
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed unique value lists for the
/// filter widgets. Immutable after construction; shared by `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All records, in source order.
    pub records: Vec<SchoolRecord>,
    /// Sorted unique campus names.
    pub campuses: Vec<String>,
    /// Sorted unique city names.
    pub cities: Vec<String>,
    /// Sorted unique school names (across all campuses).
    pub school_names: Vec<String>,
}

impl Dataset {
    /// Build the unique value indices from the loaded records.
    pub fn from_records(records: Vec<SchoolRecord>) -> Self {
        let mut campuses: BTreeSet<&str> = BTreeSet::new();
        let mut cities: BTreeSet<&str> = BTreeSet::new();
        let mut school_names: BTreeSet<&str> = BTreeSet::new();

        for rec in &records {
            campuses.insert(&rec.college);
            cities.insert(&rec.city);
            school_names.insert(&rec.school);
        }

        let campuses = campuses.into_iter().map(str::to_string).collect();
        let cities = cities.into_iter().map(str::to_string).collect();
        let school_names = school_names.into_iter().map(str::to_string).collect();

        Dataset {
            records,
            campuses,
            cities,
            school_names,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted unique school names, optionally restricted to one campus.
    pub fn schools_at(&self, campus: Option<&str>) -> Vec<String> {
        match campus {
            None => self.school_names.clone(),
            Some(campus) => {
                let names: BTreeSet<&str> = self
                    .records
                    .iter()
                    .filter(|r| r.college == campus)
                    .map(|r| r.school.as_str())
                    .collect();
                names.into_iter().map(str::to_string).collect()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Test support
// ---------------------------------------------------------------------------

/// Bare record with all counts zeroed; tests fill in what they need.
#[cfg(test)]
pub(crate) fn stub_record(
    school: &str,
    city: &str,
    college: &str,
    school_type: SchoolType,
    admit_rate: f64,
) -> SchoolRecord {
    SchoolRecord {
        school: school.to_string(),
        city: city.to_string(),
        county: "Test".to_string(),
        college: college.to_string(),
        school_type,
        applied: 0,
        admitted: 0,
        enrolled: 0,
        admit_rate,
        asian_applied: 0,
        asian_admitted: 0,
        asian_admit_rate: 0.0,
        hispanic_latinx_applied: 0,
        hispanic_latinx_admitted: 0,
        hispanic_latinx_admit_rate: 0.0,
        white_applied: 0,
        white_admitted: 0,
        white_admit_rate: 0.0,
        african_american_applied: 0,
        african_american_admitted: 0,
        african_american_admit_rate: 0.0,
        international_applied: 0,
        international_admitted: 0,
        international_admit_rate: 0.0,
        pacific_islander_applied: 0,
        pacific_islander_admitted: 0,
        pacific_islander_admit_rate: 0.0,
        american_indian_applied: 0,
        american_indian_admitted: 0,
        american_indian_admit_rate: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_tier_boundaries() {
        assert_eq!(RateTier::from_rate(70.0), RateTier::High);
        assert_eq!(RateTier::from_rate(99.9), RateTier::High);
        assert_eq!(RateTier::from_rate(69.999), RateTier::Medium);
        assert_eq!(RateTier::from_rate(40.0), RateTier::Medium);
        assert_eq!(RateTier::from_rate(39.999), RateTier::Low);
        assert_eq!(RateTier::from_rate(0.0), RateTier::Low);
        assert_eq!(RateTier::from_rate(-12.0), RateTier::Low);
    }

    #[test]
    fn dataset_indices_are_sorted_and_unique() {
        let ds = Dataset::from_records(vec![
            stub_record("Beta High", "Fresno", "UCLA", SchoolType::Public, 50.0),
            stub_record("Alpha High", "Davis", "UC Berkeley", SchoolType::Private, 60.0),
            stub_record("Beta High", "Fresno", "UC Berkeley", SchoolType::Public, 40.0),
        ]);
        assert_eq!(ds.campuses, vec!["UC Berkeley", "UCLA"]);
        assert_eq!(ds.cities, vec!["Davis", "Fresno"]);
        assert_eq!(ds.school_names, vec!["Alpha High", "Beta High"]);
    }

    #[test]
    fn schools_at_restricts_to_campus() {
        let ds = Dataset::from_records(vec![
            stub_record("Beta High", "Fresno", "UCLA", SchoolType::Public, 50.0),
            stub_record("Alpha High", "Davis", "UC Berkeley", SchoolType::Private, 60.0),
        ]);
        assert_eq!(ds.schools_at(Some("UCLA")), vec!["Beta High"]);
        assert_eq!(ds.schools_at(None), vec!["Alpha High", "Beta High"]);
    }
}
