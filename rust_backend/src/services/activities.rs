//! Activity suggestions from the most likely conditions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::VariableKind;

/// Activities that suit or should be avoided under the expected weather.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySuggestions {
    pub good: Vec<String>,
    pub avoid: Vec<String>,
}

impl ActivitySuggestions {
    pub fn is_empty(&self) -> bool {
        self.good.is_empty() && self.avoid.is_empty()
    }

    fn push_good(&mut self, activities: &[&str]) {
        push_unique(&mut self.good, activities);
    }

    fn push_avoid(&mut self, activities: &[&str]) {
        push_unique(&mut self.avoid, activities);
    }
}

fn push_unique(list: &mut Vec<String>, activities: &[&str]) {
    for activity in activities {
        if !list.iter().any(|a| a == activity) {
            list.push((*activity).to_string());
        }
    }
}

/// Suggest activities from per-variable averages in base units
/// (°C, mm, %, m/s). Variables without an average are ignored.
pub fn suggest_activities(averages: &HashMap<VariableKind, f64>) -> ActivitySuggestions {
    let mut suggestions = ActivitySuggestions::default();

    if let Some(&temperature) = averages.get(&VariableKind::Temperature) {
        if (20.0..=30.0).contains(&temperature) {
            suggestions.push_good(&["Outdoor sports", "Picnic", "Walking", "Cycling"]);
        } else if temperature > 35.0 {
            suggestions.push_avoid(&["Outdoor sports", "Long walking", "Picnic"]);
            suggestions.push_good(&["Swimming", "Indoor gym"]);
        } else if temperature < 15.0 {
            suggestions.push_avoid(&["Picnic", "Swimming"]);
            suggestions.push_good(&["Indoor activities", "Reading", "Cooking at home"]);
        }
    }

    if let Some(&rainfall) = averages.get(&VariableKind::Rainfall) {
        if rainfall > 5.0 {
            suggestions.push_avoid(&["Picnic", "Cycling", "Outdoor farming"]);
            suggestions.push_good(&["Indoor games", "Watching movies"]);
        }
    }

    if let Some(&humidity) = averages.get(&VariableKind::Humidity) {
        if humidity > 80.0 {
            suggestions.push_avoid(&["Running", "Outdoor heavy exercise"]);
            suggestions.push_good(&["Indoor rest", "Light reading"]);
        }
    }

    if let Some(&wind) = averages.get(&VariableKind::WindSpeed) {
        if wind > 10.0 {
            suggestions.push_avoid(&["Flying drones", "Cycling", "Boating"]);
            suggestions.push_good(&["Kite flying"]);
        }
    }

    suggestions
}
