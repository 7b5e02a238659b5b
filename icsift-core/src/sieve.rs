//! Filter predicates over event labels.

use std::collections::HashSet;

use crate::classify::classification;
use crate::config::FilterConfig;
use crate::error::{FilterError, FilterResult};

/// A predicate deciding whether an event with a given label is kept.
///
/// A sieve is constructed once per request and immutable afterwards;
/// [`Sieve::admits`] is the single evaluation point for all modes.
#[derive(Debug, Clone)]
pub enum Sieve {
    /// Keep every event.
    All,
    /// Keep events whose classification code is in the set.
    IncludeCodes(HashSet<char>),
    /// Drop events whose classification code is in the set.
    ExcludeCodes(HashSet<char>),
    /// Keep events whose label is in the set.
    IncludeLabels(HashSet<String>),
    /// Drop events whose label is in the set.
    ExcludeLabels(HashSet<String>),
}

impl Sieve {
    /// Build a sieve from optional `include`/`exclude` classification-code
    /// strings, as supplied in query parameters.
    ///
    /// `include` wins when both are present. When neither is supplied the
    /// sieve passes everything.
    pub fn from_codes(include: Option<&str>, exclude: Option<&str>) -> Self {
        match (include, exclude) {
            (Some(codes), _) => Sieve::IncludeCodes(codes.chars().collect()),
            (None, Some(codes)) => Sieve::ExcludeCodes(codes.chars().collect()),
            (None, None) => Sieve::All,
        }
    }

    /// Build a sieve for the named group of a filter config.
    ///
    /// `exclude-group` resolves the referenced groups' value lists (one
    /// level, the values of referenced groups are labels) into a single
    /// exclusion set at construction time.
    pub fn from_group(config: &FilterConfig, group_name: &str) -> FilterResult<Self> {
        let group = config
            .groups
            .get(group_name)
            .ok_or_else(|| FilterError::UnknownGroup(group_name.to_string()))?;

        match group.mode.as_str() {
            "include" => Ok(Sieve::IncludeLabels(group.values.iter().cloned().collect())),
            "exclude" => Ok(Sieve::ExcludeLabels(group.values.iter().cloned().collect())),
            "all" => Ok(Sieve::All),
            "exclude-group" => {
                let mut labels = HashSet::new();
                for referenced in &group.values {
                    let other = config.groups.get(referenced).ok_or_else(|| {
                        FilterError::UnknownReferencedGroup {
                            group: group_name.to_string(),
                            referenced: referenced.clone(),
                        }
                    })?;
                    labels.extend(other.values.iter().cloned());
                }
                Ok(Sieve::ExcludeLabels(labels))
            }
            _ => Err(FilterError::UnknownGroupMode {
                group: group_name.to_string(),
                mode: group.mode.clone(),
            }),
        }
    }

    /// Decide whether an event with the given label is kept.
    pub fn admits(&self, label: &str) -> bool {
        match self {
            Sieve::All => true,
            Sieve::IncludeCodes(codes) => codes.contains(&classification(label)),
            Sieve::ExcludeCodes(codes) => !codes.contains(&classification(label)),
            Sieve::IncludeLabels(labels) => labels.contains(label),
            Sieve::ExcludeLabels(labels) => !labels.contains(label),
        }
    }
}
