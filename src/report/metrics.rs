use super::usage::{available_memory_kb, ResourceUsage};
use crate::{
    data::{DegreeTable, EdgeStore},
    types::Degree,
};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
pub struct Report {
    pub graph_metrics: GraphMetrics,
    pub system_metrics: SystemMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_metrics: Option<PlaceholderMetrics>,
}

/// Statistics computed from the degree table.
#[derive(Debug, Serialize, PartialEq)]
pub struct GraphMetrics {
    pub nodes: usize,
    pub edges: usize,
    pub max_degree: Degree,
    pub average_degree: f64,
    pub isolated_nodes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree_distribution: Option<Vec<(Degree, usize)>>,
}

impl GraphMetrics {
    pub fn new(store: &EdgeStore, degrees: &DegreeTable, with_distribution: bool) -> Self {
        Self {
            nodes: store.node_count(),
            edges: store.count(),
            max_degree: degrees.max_degree(),
            average_degree: degrees.average_degree(),
            isolated_nodes: degrees.isolated(),
            degree_distribution: if with_distribution {
                Some(degrees.distribution())
            } else {
                None
            },
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SystemMetrics {
    pub execution_time_seconds: f64,
    pub cpu_user_time_seconds: f64,
    pub cpu_system_time_seconds: f64,
    pub max_memory_usage_kb: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_memory_kb: Option<u64>,
    pub workers: usize,
}

impl SystemMetrics {
    pub fn new(elapsed: Duration, usage: ResourceUsage, workers: usize) -> Self {
        Self {
            execution_time_seconds: elapsed.as_secs_f64(),
            cpu_user_time_seconds: usage.user_time.as_secs_f64(),
            cpu_system_time_seconds: usage.system_time.as_secs_f64(),
            max_memory_usage_kb: usage.max_rss_kb,
            available_memory_kb: available_memory_kb(),
            workers,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ComponentMetrics {
    pub nodes: u64,
    pub fraction_of_total_nodes: f64,
    pub edges: u64,
    pub fraction_of_total_edges: f64,
}

/// Fixed statistics of the SNAP web-Google dataset.
///
/// Nothing here is derived from the input; `simulated` is always `true`.
#[derive(Debug, Serialize, PartialEq)]
pub struct PlaceholderMetrics {
    pub simulated: bool,
    pub largest_wcc: ComponentMetrics,
    pub largest_scc: ComponentMetrics,
    pub average_clustering_coefficient: f64,
    pub triangles: u64,
    pub fraction_of_closed_triangles: f64,
    pub diameter: u32,
    pub effective_diameter_90_percentile: f64,
}

impl Default for PlaceholderMetrics {
    fn default() -> Self {
        Self {
            simulated: true,
            largest_wcc: ComponentMetrics {
                nodes: 855_802,
                fraction_of_total_nodes: 0.977,
                edges: 5_066_842,
                fraction_of_total_edges: 0.993,
            },
            largest_scc: ComponentMetrics {
                nodes: 434_818,
                fraction_of_total_nodes: 0.497,
                edges: 3_419_124,
                fraction_of_total_edges: 0.670,
            },
            average_clustering_coefficient: 0.5143,
            triangles: 13_391_903,
            fraction_of_closed_triangles: 0.01911,
            diameter: 21,
            effective_diameter_90_percentile: 8.1,
        }
    }
}

impl Report {
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn triangle_report(placeholders: bool) -> Report {
        let store = EdgeStore::from_edges(vec![(0, 1), (1, 2), (0, 2), (4, 4)]);
        let degrees = DegreeTable::from(vec![2, 2, 2, 0, 2]);
        Report {
            graph_metrics: GraphMetrics::new(&store, &degrees, true),
            system_metrics: SystemMetrics {
                execution_time_seconds: 0.5,
                cpu_user_time_seconds: 0.25,
                cpu_system_time_seconds: 0.125,
                max_memory_usage_kb: 2048,
                available_memory_kb: None,
                workers: 4,
            },
            placeholder_metrics: if placeholders {
                Some(PlaceholderMetrics::default())
            } else {
                None
            },
        }
    }

    #[test]
    fn test_graph_metrics() {
        let value: Value =
            serde_json::from_str(&triangle_report(false).to_json(false).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "graph_metrics": {
                    "nodes": 5,
                    "edges": 4,
                    "max_degree": 2,
                    "average_degree": 1.6,
                    "isolated_nodes": 1,
                    "degree_distribution": [[0, 1], [2, 4]],
                },
                "system_metrics": {
                    "execution_time_seconds": 0.5,
                    "cpu_user_time_seconds": 0.25,
                    "cpu_system_time_seconds": 0.125,
                    "max_memory_usage_kb": 2048,
                    "workers": 4,
                },
            })
        );
    }

    #[test]
    fn test_placeholders_are_flagged() {
        let value: Value =
            serde_json::from_str(&triangle_report(true).to_json(true).unwrap()).unwrap();
        let placeholders = &value["placeholder_metrics"];
        assert_eq!(placeholders["simulated"], json!(true));
        assert_eq!(placeholders["diameter"], json!(21));
        assert_eq!(placeholders["largest_scc"]["nodes"], json!(434_818));
    }
}
