//! End-to-end drawing tests: build small synthetic fields, render every
//! projection and grid shape, and check that exactly one image lands on disk.

use std::path::Path;

use esmplot_io::{CoordNames, Field2d};
use esmplot_layout::{
    CellSize, GeoExtent, Labels, MapFigure, OutputFormat, PanelRole, Period, Presence,
    ProfileFigure, ProfileSeries, Projection, ScaleCatalog, Titles, select_layout,
};
use esmplot_render::{FieldSet, RenderError, render_map, render_profiles};
use ndarray::Array2;
use tempfile::tempdir;

fn field(name: &str, offset: f64) -> Field2d {
    let lat: Vec<f64> = (0..19).map(|i| -90.0 + 10.0 * i as f64).collect();
    let lon: Vec<f64> = (0..36).map(|i| 10.0 * i as f64).collect();
    let values = Array2::from_shape_fn((lat.len(), lon.len()), |(i, j)| {
        offset + 30.0 * (lat[i].to_radians().cos()) + (lon[j].to_radians().sin())
    });
    Field2d::new(name, CoordNames::new("lat", "lon"), lat, lon, values, None).unwrap()
}

fn figure(projection: Projection, presence: Presence, format: OutputFormat) -> MapFigure {
    let titles = Titles {
        labels: Labels::default(),
        period: Period::Annual,
        mean_unit: Some("°C".to_string()),
    };
    MapFigure {
        layout: select_layout(&presence, &titles),
        projection,
        extent: GeoExtent::new((-60.0, 60.0), (0.0, 360.0)),
        scales: ScaleCatalog::default().resolve("tas").unwrap().clone(),
        borders: false,
        format,
        cell: CellSize {
            width: 320,
            height: 260,
        },
    }
}

fn fields_for(fig: &MapFigure) -> FieldSet {
    let mut set = FieldSet::new();
    for panel in fig.layout.panels() {
        let offset = match panel.role {
            PanelRole::Observation | PanelRole::Model1 | PanelRole::Model2 => -10.0,
            _ => -15.0,
        };
        set.insert(panel.role, field("tas", offset));
    }
    set
}

fn files_in(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[test]
fn three_panel_plate_carree_png() {
    let dir = tempdir().unwrap();
    let fig = figure(Projection::PlateCarree, Presence::default(), OutputFormat::Png);
    let path = dir.path().join("map.png");
    render_map(&fig, &fields_for(&fig), &path).unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
    assert_eq!(files_in(dir.path()), 1);
}

#[test]
fn six_slot_grid_for_every_projection_svg() {
    let presence = Presence {
        model2: true,
        bias2: true,
        bias3: true,
    };
    for projection in Projection::ALL {
        let dir = tempdir().unwrap();
        let fig = figure(projection, presence, OutputFormat::Svg);
        let path = dir.path().join("map.svg");
        render_map(&fig, &fields_for(&fig), &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"), "{projection}");
        assert!(svg.contains("Bias (CMIP7 - CMIP6)"), "{projection}");
    }
}

#[test]
fn blank_slots_are_not_required() {
    let dir = tempdir().unwrap();
    let presence = Presence {
        model2: true,
        bias2: false,
        bias3: false,
    };
    let fig = figure(Projection::Robinson, presence, OutputFormat::Svg);
    assert_eq!(fig.layout.panels().count(), 4);
    let path = dir.path().join("map.svg");
    render_map(&fig, &fields_for(&fig), &path).unwrap();
    assert!(path.exists());
}

#[test]
fn missing_field_is_reported_before_drawing() {
    let dir = tempdir().unwrap();
    let fig = figure(Projection::PlateCarree, Presence::default(), OutputFormat::Png);
    let mut set = FieldSet::new();
    set.insert(PanelRole::Observation, field("tas", 0.0));
    let path = dir.path().join("map.png");
    let err = render_map(&fig, &set, &path).unwrap_err();
    assert!(matches!(err, RenderError::MissingField { ref role } if role == "model1"));
    assert_eq!(files_in(dir.path()), 0);
}

#[test]
fn nan_cells_are_left_blank() {
    let dir = tempdir().unwrap();
    let fig = figure(Projection::PlateCarree, Presence::default(), OutputFormat::Svg);
    let mut set = FieldSet::new();
    for panel in fig.layout.panels() {
        let f = field("tas", 0.0).map_values(|_| f64::NAN, None);
        set.insert(panel.role, f);
    }
    let path = dir.path().join("map.svg");
    render_map(&fig, &set, &path).unwrap();
    assert!(path.exists());
}

#[test]
fn profile_png_and_svg() {
    let series = vec![
        ProfileSeries {
            label: "Observation (°C)".into(),
            points: vec![(1000.0, 15.0), (850.0, 8.0), (500.0, -20.0), (200.0, -55.0)],
        },
        ProfileSeries {
            label: "CMIP7 (°C)".into(),
            points: vec![(1000.0, 16.0), (850.0, 9.0), (500.0, -19.0), (200.0, -54.0)],
        },
        ProfileSeries {
            label: "CMIP6 (°C)".into(),
            points: vec![(1000.0, 14.0), (850.0, f64::NAN), (500.0, -21.0), (200.0, -56.0)],
        },
    ];
    let dir = tempdir().unwrap();
    for format in [OutputFormat::Png, OutputFormat::Svg] {
        let fig = ProfileFigure::new(
            "Vertical Temperature Profile (Mean)",
            "Temperature (°C)",
            series.clone(),
            format,
        );
        let path = dir.path().join(format!("profile.{}", format.extension()));
        render_profiles(&fig, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
    assert_eq!(files_in(dir.path()), 2);
}
