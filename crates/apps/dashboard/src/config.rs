//! Command line and environment configuration.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use foundation::math::GeoPoint;
use records::{Category, NewClimateRecord, NewDisasterRecord, NewEnvironmentalRecord};

use crate::api::ApiConfig;
use crate::dashboard::DashboardOptions;
use crate::view::DashboardView;

#[derive(Debug, Parser)]
#[command(name = "dashboard", about = "Terminal dashboard for the climate API")]
pub struct Cli {
    /// Base URL of the API, without the /functions/v1 suffix
    #[arg(long, env = "CLIMATE_API_URL", global = true)]
    pub api_url: Option<String>,

    #[arg(long, env = "CLIMATE_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn api_config(&self) -> Option<ApiConfig> {
        ApiConfig::new(self.api_url.as_deref(), self.api_key.as_deref())
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Refresh periodically and print a frame per cycle
    Watch(WatchArgs),
    /// Print the API status line
    Status,
    /// Ask the API to insert demo rows
    Seed,
    AddClimate(ClimateArgs),
    ReportDisaster(DisasterArgs),
    AddEnvironmental(EnvironmentalArgs),
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    #[arg(long, default_value_t = Category::Temperature)]
    pub category: Category,

    #[arg(long, default_value_t = 60)]
    pub interval_secs: u64,

    #[arg(long, default_value_t = 2)]
    pub reload_delay_secs: u64,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Print frames as JSON instead of text
    #[arg(long)]
    pub json: bool,

    #[arg(long)]
    pub hide_connections: bool,

    /// Highlight the record nearest to "lat,lng"
    #[arg(long, value_parser = parse_point)]
    pub focus: Option<GeoPoint>,

    /// Alert ids to hide
    #[arg(long)]
    pub dismiss: Vec<String>,

    /// Sidebar sections to start collapsed
    #[arg(long)]
    pub collapse: Vec<Category>,
}

impl WatchArgs {
    pub fn options(&self) -> DashboardOptions {
        DashboardOptions {
            interval: Duration::from_secs(self.interval_secs.max(1)),
            reload_delay: Duration::from_secs(self.reload_delay_secs),
        }
    }

    pub fn view(&self) -> DashboardView {
        let mut view = DashboardView {
            category: self.category,
            show_connections: !self.hide_connections,
            focus: self.focus,
            ..DashboardView::default()
        };
        for id in &self.dismiss {
            view.alerts.dismiss(id.as_str());
        }
        for &category in &self.collapse {
            if view.sidebar.is_expanded(category) {
                view.sidebar.toggle(category);
            }
        }
        view
    }
}

#[derive(Debug, Args)]
pub struct ClimateArgs {
    #[arg(long)]
    pub location: String,
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,
    #[arg(long, allow_hyphen_values = true)]
    pub temperature: f64,
    #[arg(long)]
    pub humidity: f64,
    #[arg(long)]
    pub wind_speed: f64,
}

impl From<ClimateArgs> for NewClimateRecord {
    fn from(a: ClimateArgs) -> Self {
        NewClimateRecord {
            location: a.location,
            lat: a.lat,
            lng: a.lng,
            temperature: a.temperature,
            humidity: a.humidity,
            wind_speed: a.wind_speed,
        }
    }
}

#[derive(Debug, Args)]
pub struct DisasterArgs {
    #[arg(long = "type")]
    pub kind: String,
    #[arg(long)]
    pub location: String,
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,
    #[arg(long, default_value = "Medium")]
    pub severity: String,
    #[arg(long, default_value = "")]
    pub description: String,
}

impl From<DisasterArgs> for NewDisasterRecord {
    fn from(a: DisasterArgs) -> Self {
        NewDisasterRecord {
            kind: a.kind,
            location: a.location,
            lat: a.lat,
            lng: a.lng,
            severity: a.severity.into(),
            description: a.description,
        }
    }
}

#[derive(Debug, Args)]
pub struct EnvironmentalArgs {
    #[arg(long)]
    pub location: String,
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,
    #[arg(long)]
    pub air_quality: f64,
    #[arg(long)]
    pub co2_level: f64,
    #[arg(long)]
    pub pollution_index: f64,
}

impl From<EnvironmentalArgs> for NewEnvironmentalRecord {
    fn from(a: EnvironmentalArgs) -> Self {
        NewEnvironmentalRecord {
            location: a.location,
            lat: a.lat,
            lng: a.lng,
            air_quality: a.air_quality,
            co2_level: a.co2_level,
            pollution_index: a.pollution_index,
        }
    }
}

/// Parses "lat,lng" in decimal degrees.
pub fn parse_point(s: &str) -> Result<GeoPoint, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lng\", got '{s}'"))?;
    let lat: f64 = lat.trim().parse().map_err(|_| format!("bad latitude '{lat}'"))?;
    let lng: f64 = lng.trim().parse().map_err(|_| format!("bad longitude '{lng}'"))?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(format!("point out of range: {lat},{lng}"));
    }
    Ok(GeoPoint::new(lat, lng))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_points() {
        assert_eq!(parse_point("51.5, -0.12"), Ok(GeoPoint::new(51.5, -0.12)));
        assert!(parse_point("51.5").is_err());
        assert!(parse_point("91,0").is_err());
        assert!(parse_point("x,0").is_err());
    }

    #[test]
    fn watch_flags_shape_the_view() {
        let cli = Cli::try_parse_from([
            "dashboard",
            "--api-url",
            "http://localhost:54321",
            "--api-key",
            "k",
            "watch",
            "--category",
            "environmental",
            "--hide-connections",
            "--focus=-33.9,151.2",
            "--dismiss",
            "disaster-1",
            "--collapse",
            "disasters",
            "--once",
        ])
        .unwrap();
        assert!(cli.api_config().is_some());
        let Command::Watch(args) = cli.command else {
            panic!("expected watch");
        };
        assert!(args.once);
        assert_eq!(args.options().interval, Duration::from_secs(60));

        let view = args.view();
        assert_eq!(view.category, Category::Environmental);
        assert!(!view.show_connections);
        assert_eq!(view.focus, Some(GeoPoint::new(-33.9, 151.2)));
        assert!(view.alerts.is_dismissed("disaster-1"));
        assert!(!view.sidebar.is_expanded(Category::Disasters));
        assert!(view.sidebar.is_expanded(Category::Temperature));
    }

    #[test]
    fn report_disaster_keeps_free_form_severity() {
        let cli = Cli::try_parse_from([
            "dashboard",
            "report-disaster",
            "--type",
            "Flood",
            "--location",
            "Mumbai",
            "--lat",
            "19.07",
            "--lng",
            "72.87",
            "--severity",
            "Critical",
        ])
        .unwrap();
        let Command::ReportDisaster(args) = cli.command else {
            panic!("expected report-disaster");
        };
        let body: NewDisasterRecord = args.into();
        assert_eq!(body.kind, "Flood");
        assert!(!body.severity.is_recognized());
    }
}
