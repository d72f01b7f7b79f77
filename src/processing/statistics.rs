//! Statistics extraction.
//!
//! Kea has reported the same per-subnet counters in several shapes over the
//! years. Each shape has its own [`StatsParser`]; every response item is run
//! through all of them and the resulting observations are applied in order,
//! so a later value for the same subnet and bucket replaces an earlier one.

use crate::kea::CommandResponse;
use crate::models::value::{as_count, first_truthy, parse_count, subnet_key};
use crate::models::{Bucket, MetricObservation, SeenNames, SubnetTable};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// List-valued keys of `arguments` that may hold `{name, value, ...}` entries.
pub const GROUP_KEYS: [&str; 5] = ["statistics", "subnet4", "dhcp4", "stats", "result"];

/// Regex for `subnet[<id>].<metric>` statistic names.
static SUBNET_METRIC_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_subnet_metric_regex() -> &'static Regex {
    SUBNET_METRIC_REGEX.get_or_init(|| Regex::new(r"^subnet\[(\d+)\]\.(.+)").expect("Invalid Regex"))
}

/// Split `subnet[5].assigned-addresses` into `("5", "assigned-addresses")`.
pub fn split_subnet_metric(name: &str) -> Option<(&str, &str)> {
    let caps = get_subnet_metric_regex().captures(name)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Most recent sample of a `[[value, timestamp], ...]` statistic.
///
/// The last sample wins. A nested sample contributes its first element, a bare
/// number is used as is; anything else yields `None`.
pub fn latest_sample(samples: &Value) -> Option<u64> {
    match samples.as_array()?.last()? {
        Value::Array(sample) => parse_count(sample.first()?),
        last => as_count(last),
    }
}

/// Observation from a `subnet[<id>].<metric>` name, if the metric maps to a bucket.
fn observe_pattern(name: &str, value: u64) -> Option<MetricObservation> {
    let (subnet_id, metric) = split_subnet_metric(name)?;
    let metric = metric.to_lowercase();
    let bucket = Bucket::from_metric(&metric)?;
    Some(MetricObservation {
        subnet_id: subnet_id.to_string(),
        metric,
        bucket,
        value,
    })
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The response layouts understood by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsParser {
    /// `{"subnet[1].assigned-addresses": [[12, "2024-01-01 ..."]], ...}`
    FlatKeys,
    /// `{"statistics": [{"name": ..., "value": ..., "subnet-id": ...}, ...]}`
    GroupedLists,
}

impl StatsParser {
    /// Every parser, in the order their observations are applied.
    pub const ALL: [StatsParser; 2] = [StatsParser::FlatKeys, StatsParser::GroupedLists];

    pub fn parse(self, args: &Map<String, Value>, seen: &mut SeenNames) -> Vec<MetricObservation> {
        match self {
            StatsParser::FlatKeys => parse_flat_keys(args, seen),
            StatsParser::GroupedLists => parse_grouped_lists(args, seen),
        }
    }
}

fn parse_flat_keys(args: &Map<String, Value>, seen: &mut SeenNames) -> Vec<MetricObservation> {
    let mut observations = Vec::new();
    for (key, samples) in args {
        seen.record(key);
        if split_subnet_metric(key).is_none() {
            continue;
        }
        match latest_sample(samples) {
            Some(value) => observations.extend(observe_pattern(key, value)),
            None => log::trace!("{key}: no numeric sample in {samples}"),
        }
    }
    observations
}

fn parse_grouped_lists(args: &Map<String, Value>, seen: &mut SeenNames) -> Vec<MetricObservation> {
    let mut observations = Vec::new();
    for group in GROUP_KEYS {
        let Some(Value::Array(entries)) = args.get(group) else {
            continue;
        };
        for entry in entries.iter().filter_map(Value::as_object) {
            let name = first_truthy(entry, &["name", "stat-name"])
                .map(text_of)
                .unwrap_or_default();
            if !name.is_empty() {
                seen.record(&name);
            }
            let value = first_truthy(entry, &["value", "sum", "count"])
                .and_then(parse_count)
                .unwrap_or(0);

            if let Some(raw_id) = first_truthy(entry, &["subnet-id", "subnet_id"]) {
                // Tagged entries are classified on `name` alone and never fall
                // through to the pattern match.
                let tagged = entry
                    .get("name")
                    .filter(|v| !v.is_null())
                    .map(text_of)
                    .unwrap_or_default();
                match (subnet_key(raw_id), Bucket::from_tagged_name(&tagged)) {
                    (Some(subnet_id), Some(bucket)) => observations.push(MetricObservation {
                        subnet_id,
                        metric: tagged.to_lowercase(),
                        bucket,
                        value,
                    }),
                    _ => log::trace!("{group}: skipping tagged entry {tagged:?} id={raw_id}"),
                }
                continue;
            }

            observations.extend(observe_pattern(&name, value));
        }
    }
    observations
}

/// Observations from one response item, flat keys first.
pub fn observations(item: &CommandResponse, seen: &mut SeenNames) -> Vec<MetricObservation> {
    let Some(args) = item.arguments_map() else {
        return Vec::new();
    };
    StatsParser::ALL
        .iter()
        .flat_map(|parser| parser.parse(args, seen))
        .collect()
}

/// Fold every statistics response into `table`, logging names into `seen`.
/// Returns the number of observations applied.
pub fn extract_statistics(
    responses: &[CommandResponse],
    table: &mut SubnetTable,
    seen: &mut SeenNames,
) -> usize {
    let mut applied = 0;
    for item in responses {
        for obs in observations(item, seen) {
            log::trace!(
                "subnet[{}] {} = {} ({:?})",
                obs.subnet_id,
                obs.metric,
                obs.value,
                obs.bucket
            );
            table.entry(&obs.subnet_id).put(obs.bucket, obs.value);
            applied += 1;
        }
    }
    log::debug!(
        "extract_statistics: {applied} observation(s), {} subnet(s), {} name(s) seen",
        table.len(),
        seen.len()
    );
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(arguments: Value) -> CommandResponse {
        CommandResponse {
            result: Some(0),
            text: None,
            arguments: Some(arguments),
        }
    }

    fn run(responses: &[CommandResponse]) -> (SubnetTable, SeenNames) {
        let mut table = SubnetTable::new();
        let mut seen = SeenNames::new();
        extract_statistics(responses, &mut table, &mut seen);
        (table, seen)
    }

    #[test]
    fn test_split_subnet_metric() {
        assert_eq!(
            split_subnet_metric("subnet[12].assigned-addresses"),
            Some(("12", "assigned-addresses"))
        );
        assert_eq!(
            split_subnet_metric("subnet[1].pool[0].assigned-addresses"),
            Some(("1", "pool[0].assigned-addresses"))
        );
        assert_eq!(split_subnet_metric("Subnet[1].total-addresses"), None);
        assert_eq!(split_subnet_metric("x.subnet[1].total-addresses"), None);
        assert_eq!(split_subnet_metric("subnet[a].total-addresses"), None);
        assert_eq!(split_subnet_metric("pkt4-received"), None);
    }

    #[test]
    fn test_latest_sample() {
        assert_eq!(latest_sample(&json!([[5, "t1"], [9, "t0"]])), Some(9));
        assert_eq!(latest_sample(&json!([3, 4])), Some(4));
        assert_eq!(latest_sample(&json!([["7", "t"]])), Some(7));
        assert_eq!(latest_sample(&json!([])), None);
        assert_eq!(latest_sample(&json!([[]])), None);
        assert_eq!(latest_sample(&json!([["n/a", "t"]])), None);
        assert_eq!(latest_sample(&json!(["12"])), None);
        assert_eq!(latest_sample(&json!(12)), None);
    }

    #[test]
    fn test_flat_keys() {
        let (table, seen) = run(&[item(json!({
            "pkt4-received": [[100, "2026-10-19 10:00:00"]],
            "subnet[5].total-addresses": [[100, "2026-10-19 10:00:00"]],
            "subnet[5].assigned-addresses": [[37, "2026-10-19 10:00:00"]],
            "subnet[5].declined-addresses": [[2, "2026-10-19 10:00:00"]],
            "subnet[5].reserved-addresses": [[1, "2026-10-19 10:00:00"]],
            "subnet[6].Reservations-Count": [[4, "2026-10-19 10:00:00"]]
        }))]);

        let r = table.get("5").unwrap();
        assert_eq!(r.total, Some(100));
        assert_eq!(r.used, Some(37));
        assert_eq!(r.declined, Some(2));
        assert_eq!(r.reservations, None, "reserved-addresses has no bucket");
        assert_eq!(table.get("6").unwrap().reservations, Some(4));
        assert_eq!(seen.len(), 6);
        assert_eq!(seen.unique()[0], "pkt4-received");
    }

    #[test]
    fn test_flat_keys_unresolvable_value_is_dropped() {
        let (table, _) = run(&[item(json!({
            "subnet[3].total-addresses": [],
            "subnet[3].assigned-addresses": [[null, "t"]]
        }))]);
        assert!(table.get("3").is_none(), "nothing numeric, no record");
    }

    #[test]
    fn test_last_write_wins_within_statistics() {
        let (table, _) = run(&[
            item(json!({
                "subnet[1].assigned-addresses": [[10, "t"]],
                "subnet[1].total-leases": [[12, "t"]]
            })),
            item(json!({"subnet[1].reservations": [[2, "t"]]})),
            item(json!({"subnet[1].reservations": [[3, "t"]]})),
        ]);
        let r = table.get("1").unwrap();
        assert_eq!(r.used, Some(12));
        assert_eq!(r.reservations, Some(3));
    }

    #[test]
    fn test_grouped_tagged_entries() {
        let (table, seen) = run(&[item(json!({
            "statistics": [
                {"name": "cumulative-assigned-addresses", "value": 40, "subnet-id": 2},
                {"name": "total-addresses", "sum": 254, "subnet_id": 2},
                {"name": "declined-addresses", "value": 3, "subnet-id": 2},
                {"name": "reservations", "count": 5, "subnet-id": "2"},
                {"stat-name": "assigned-addresses", "value": 99, "subnet-id": 2}
            ]
        }))]);

        let r = table.get("2").unwrap();
        assert_eq!(r.used, Some(40));
        assert_eq!(r.total, Some(254));
        assert_eq!(r.declined, None, "tagged entries have no declined bucket");
        assert_eq!(r.reservations, Some(5));
        assert_eq!(
            seen.unique(),
            vec![
                "cumulative-assigned-addresses",
                "total-addresses",
                "declined-addresses",
                "reservations",
                "assigned-addresses"
            ]
        );
    }

    #[test]
    fn test_grouped_untagged_entries_use_pattern() {
        let (table, _) = run(&[item(json!({
            "stats": [
                {"name": "subnet[8].total-addresses", "value": 50},
                {"stat-name": "subnet[8].assigned-addresses", "value": "20"},
                {"name": "subnet[8].declined-addresses", "value": 0, "sum": 4},
                {"name": "subnet[8].reservations"},
                {"name": "pkt4-sent", "value": 1000}
            ],
            "result": "not-a-list",
            "other": [{"name": "subnet[9].total-addresses", "value": 1}]
        }))]);

        let r = table.get("8").unwrap();
        assert_eq!(r.total, Some(50));
        assert_eq!(r.used, Some(20));
        assert_eq!(r.declined, Some(4));
        assert_eq!(r.reservations, Some(0), "missing value defaults to 0");
        assert!(table.get("9").is_none(), "unknown group keys are ignored");
    }

    #[test]
    fn test_both_parsers_run_on_one_item() {
        let (table, seen) = run(&[item(json!({
            "subnet[4].total-addresses": [[10, "t"]],
            "subnet4": [{"name": "subnet[4].total-addresses", "value": 20}]
        }))]);
        assert_eq!(table.get("4").unwrap().total, Some(20));
        assert_eq!(
            seen.unique(),
            vec!["subnet[4].total-addresses", "subnet4"]
        );
    }

    #[test]
    fn test_items_without_object_arguments() {
        let responses = vec![
            CommandResponse::default(),
            item(json!([1, 2, 3])),
            item(json!("text")),
        ];
        let (table, seen) = run(&responses);
        assert!(table.is_empty());
        assert!(seen.is_empty());
    }

    #[test]
    fn test_parser_variants_are_independent() {
        let args = json!({
            "subnet[1].assigned-addresses": [[3, "t"]],
            "statistics": [{"name": "assigned-addresses", "value": 4, "subnet-id": 1}]
        });
        let args = args.as_object().unwrap();
        let mut seen = SeenNames::new();
        let flat = StatsParser::FlatKeys.parse(args, &mut seen);
        let grouped = StatsParser::GroupedLists.parse(args, &mut seen);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].value, 3);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].subnet_id, "1");
        assert_eq!(grouped[0].value, 4);
    }
}
