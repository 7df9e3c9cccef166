//! Marker and legend data for the map view. No rendering happens here.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{HazardEvent, HazardType};

const MIN_RADIUS: f64 = 4.0;
const MAX_RADIUS: f64 = 24.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub color: &'static str,
    pub radius: f64,
    pub fill_opacity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendEntry {
    pub hazard_type: HazardType,
    pub label: &'static str,
    pub color: &'static str,
}

pub fn color_for(hazard_type: HazardType) -> &'static str {
    match hazard_type {
        HazardType::Earthquake => "#e53e3e",
        HazardType::Tsunami => "#3182ce",
        HazardType::Fire => "#dd6b20",
        HazardType::Weather => "#805ad5",
        HazardType::Flood => "#319795",
    }
}

/// Marker size grows with magnitude within its own type's scale only.
pub fn marker_style(event: &HazardEvent) -> MarkerStyle {
    let scale = match event.hazard_type {
        // Richter is logarithmic and usually 0-9
        HazardType::Earthquake => 2.5,
        HazardType::Tsunami => 2.0,
        HazardType::Fire | HazardType::Weather | HazardType::Flood => 3.5,
    };
    let magnitude = if event.magnitude.is_finite() { event.magnitude.max(0.0) } else { 0.0 };
    MarkerStyle {
        color: color_for(event.hazard_type),
        radius: (magnitude * scale).clamp(MIN_RADIUS, MAX_RADIUS),
        fill_opacity: 0.7,
    }
}

pub fn legend() -> Vec<LegendEntry> {
    HazardType::ALL
        .iter()
        .map(|&hazard_type| LegendEntry {
            hazard_type,
            label: legend_label(hazard_type),
            color: color_for(hazard_type),
        })
        .collect()
}

fn legend_label(hazard_type: HazardType) -> &'static str {
    match hazard_type {
        HazardType::Earthquake => "Earthquakes",
        HazardType::Tsunami => "Tsunami Warnings",
        HazardType::Fire => "Wildfires",
        HazardType::Weather => "Weather Alerts",
        HazardType::Flood => "Flood Gauges",
    }
}

/// Event counts per type, for the legend badges.
pub fn summarize(events: &[HazardEvent]) -> BTreeMap<HazardType, usize> {
    let mut counts = BTreeMap::new();
    for event in events {
        *counts.entry(event.hazard_type).or_insert(0) += 1;
    }
    counts
}
