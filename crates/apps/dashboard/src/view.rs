//! Presentation layer: turns a [`Refresh`] into a [`Frame`] for the active
//! category. Alert dismissals and expanded sidebar sections live here and
//! are never persisted.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use compute::{Overview, SpatialAnalysis};
use foundation::math::{project_mercator, GeoPoint};
use layers::{
    markers, ocean_color, region_fills, style, CategoryStyle, ConnectionGraph, Marker, RegionFill,
    Rgb, Rgba, VisualEncoding,
};
use records::{Category, DisasterRecord, Record, Snapshot};
use serde::Serialize;

use crate::refresh::{Refresh, Sources};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: String,
    pub kind: String,
    pub location: String,
    pub description: String,
}

/// High-severity disaster alerts, minus the ones the user dismissed.
#[derive(Debug, Default)]
pub struct AlertPanel {
    dismissed: HashSet<String>,
}

impl AlertPanel {
    pub const MAX_ALERTS: usize = 3;

    pub fn dismiss(&mut self, id: impl Into<String>) {
        self.dismissed.insert(id.into());
    }

    pub fn is_dismissed(&self, id: &str) -> bool {
        self.dismissed.contains(id)
    }

    pub fn alerts(&self, disasters: &[DisasterRecord]) -> Vec<Alert> {
        disasters
            .iter()
            .filter(|d| d.severity.is_high() && !self.is_dismissed(&d.id))
            .take(Self::MAX_ALERTS)
            .map(|d| Alert {
                id: d.id.clone(),
                kind: d.kind.clone(),
                location: d.location.clone(),
                description: d.description.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarItem {
    pub id: String,
    pub location: String,
    pub primary: String,
    pub secondary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarSection {
    pub category: Category,
    pub title: &'static str,
    pub total: usize,
    pub items: Vec<SidebarItem>,
    /// Rows beyond the first [`Sidebar::VISIBLE_ITEMS`].
    pub remaining: usize,
}

impl SidebarSection {
    pub fn more_label(&self) -> Option<String> {
        (self.remaining > 0).then(|| format!("+{} more items", self.remaining))
    }
}

/// Per-category detail lists. All sections start expanded.
#[derive(Debug)]
pub struct Sidebar {
    expanded: BTreeSet<Category>,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            expanded: Category::ALL.into_iter().collect(),
        }
    }
}

impl Sidebar {
    pub const VISIBLE_ITEMS: usize = 8;

    pub fn toggle(&mut self, category: Category) {
        if !self.expanded.remove(&category) {
            self.expanded.insert(category);
        }
    }

    pub fn is_expanded(&self, category: Category) -> bool {
        self.expanded.contains(&category)
    }

    pub fn sections(&self, snapshot: &Snapshot) -> Vec<SidebarSection> {
        self.expanded
            .iter()
            .map(|&category| {
                let (title, items): (&'static str, Vec<SidebarItem>) = match category {
                    Category::Temperature => (
                        "Climate Data",
                        list_items(&snapshot.climate, |r| {
                            (format!("{}°C", r.temperature), format!("{}% humidity", r.humidity))
                        }),
                    ),
                    Category::Disasters => (
                        "Active Disasters",
                        list_items(&snapshot.disasters, |r| {
                            (r.severity.to_string(), r.kind.clone())
                        }),
                    ),
                    Category::Environmental => (
                        "Environmental Data",
                        list_items(&snapshot.environmental, |r| {
                            (format!("AQI: {}", r.air_quality), format!("{} ppm CO2", r.co2_level))
                        }),
                    ),
                };
                let total = snapshot.len(category);
                SidebarSection {
                    category,
                    title,
                    total,
                    remaining: total.saturating_sub(items.len()),
                    items,
                }
            })
            .collect()
    }
}

fn list_items<R: Record>(records: &[R], text: impl Fn(&R) -> (String, String)) -> Vec<SidebarItem> {
    records
        .iter()
        .take(Sidebar::VISIBLE_ITEMS)
        .map(|r| {
            let (primary, secondary) = text(r);
            SidebarItem {
                id: r.id().to_string(),
                location: r.location().to_string(),
                primary,
                secondary,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub from: String,
    pub to: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionLayer {
    pub color: Rgba,
    pub lines: Vec<Line>,
    pub truncated: bool,
}

/// The record nearest to the focus point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Focused {
    pub id: String,
    pub location: String,
    pub headline: String,
    pub detail: String,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub status: String,
    /// Row count reported by the API, when it answered.
    pub records: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub cycle: u64,
    pub category: Category,
    pub style: &'static CategoryStyle,
    pub markers: Vec<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections: Option<ConnectionLayer>,
    pub regions: Vec<RegionFill>,
    pub ocean: Rgb,
    pub overview: Overview,
    pub alerts: Vec<Alert>,
    pub sidebar: Vec<SidebarSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focused: Option<Focused>,
    pub badge: StatusBadge,
    pub sources: Sources,
}

struct CategoryLayers {
    markers: Vec<Marker>,
    connections: Option<ConnectionLayer>,
    regions: Vec<RegionFill>,
    focused: Option<Focused>,
}

fn category_layers<R: VisualEncoding>(
    records: &[R],
    show_connections: bool,
    focus: Option<GeoPoint>,
) -> CategoryLayers {
    let connections = show_connections.then(|| {
        let graph = ConnectionGraph::build(records);
        let lines = graph
            .edges
            .iter()
            .map(|e| {
                let (a, b) = (&records[e.a], &records[e.b]);
                let (pa, pb) = (project_mercator(a.point()), project_mercator(b.point()));
                Line {
                    from: a.id().to_string(),
                    to: b.id().to_string(),
                    x1: pa.x,
                    y1: pa.y,
                    x2: pb.x,
                    y2: pb.y,
                }
            })
            .collect();
        ConnectionLayer {
            color: style(R::CATEGORY).connection,
            lines,
            truncated: graph.truncated,
        }
    });

    let focused = focus
        .and_then(|p| SpatialAnalysis::nearest(records, p))
        .map(|(i, distance_km)| {
            let r = &records[i];
            Focused {
                id: r.id().to_string(),
                location: r.location().to_string(),
                headline: r.headline(),
                detail: r.detail(),
                distance_km,
            }
        });

    CategoryLayers {
        markers: markers(records),
        connections,
        regions: region_fills(records),
        focused,
    }
}

/// Component-local view state plus the render entry point.
#[derive(Debug)]
pub struct DashboardView {
    pub category: Category,
    pub show_connections: bool,
    pub focus: Option<GeoPoint>,
    pub alerts: AlertPanel,
    pub sidebar: Sidebar,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self {
            category: Category::default(),
            show_connections: true,
            focus: None,
            alerts: AlertPanel::default(),
            sidebar: Sidebar::default(),
        }
    }
}

impl DashboardView {
    pub fn render(&self, refresh: &Refresh) -> Frame {
        let snap = &refresh.snapshot;
        let layers = match self.category {
            Category::Temperature => {
                category_layers(&snap.climate, self.show_connections, self.focus)
            }
            Category::Disasters => {
                category_layers(&snap.disasters, self.show_connections, self.focus)
            }
            Category::Environmental => {
                category_layers(&snap.environmental, self.show_connections, self.focus)
            }
        };

        Frame {
            cycle: refresh.cycle,
            category: self.category,
            style: style(self.category),
            markers: layers.markers,
            connections: layers.connections,
            regions: layers.regions,
            ocean: ocean_color(snap, self.category),
            overview: Overview::from_snapshot(snap),
            alerts: self.alerts.alerts(&snap.disasters),
            sidebar: self.sidebar.sections(snap),
            focused: layers.focused,
            badge: StatusBadge {
                label: if refresh.status.using_mock_data {
                    "Mock Data"
                } else {
                    "Live API"
                },
                status: refresh.status.status.clone(),
                records: refresh.status.summary.map(|s| s.total()),
            },
            sources: refresh.sources.clone(),
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[cycle {}] {} | {}",
            self.cycle, self.style.title, self.badge.label
        )?;
        if let Some(n) = self.badge.records {
            write!(f, " | {n} records")?;
        }
        writeln!(f)?;

        let legend: Vec<String> = self
            .style
            .legend
            .iter()
            .map(|e| format!("{} {}", e.label, e.color))
            .collect();
        writeln!(f, "  legend: {}", legend.join(", "))?;

        write!(f, "  markers: {}", self.markers.len())?;
        if let Some(c) = &self.connections {
            write!(f, ", connections: {}", c.lines.len())?;
            if c.truncated {
                write!(f, " (truncated)")?;
            }
        }
        writeln!(f, ", ocean: {}", self.ocean)?;

        let o = &self.overview;
        writeln!(
            f,
            "  climate: avg {:.1}°C ({:.1}..{:.1}), humidity {:.0}%, wind {:.1} km/h",
            o.climate.temperature.mean,
            o.climate.temperature.min,
            o.climate.temperature.max,
            o.climate.mean_humidity,
            o.climate.mean_wind_speed
        )?;
        writeln!(
            f,
            "  disasters: {} total, {} active",
            o.disasters.total,
            o.disasters.active()
        )?;
        writeln!(
            f,
            "  air: avg AQI {:.0}, CO2 {:.0} ppm, pollution {:.1}/10",
            o.environmental.air_quality.mean, o.environmental.mean_co2, o.environmental.mean_pollution
        )?;

        for a in &self.alerts {
            writeln!(f, "  ALERT {} in {}: {}", a.kind, a.location, a.description)?;
        }
        for section in &self.sidebar {
            write!(f, "  {} ({})", section.title, section.total)?;
            if let Some(more) = section.more_label() {
                write!(f, " {more}")?;
            }
            writeln!(f)?;
        }
        if let Some(focus) = &self.focused {
            writeln!(
                f,
                "  focus: {} {} / {} ({:.0} km away)",
                focus.location, focus.headline, focus.detail, focus.distance_km
            )?;
        }
        Ok(())
    }
}
