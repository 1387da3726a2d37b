//! Field advisory models: fertilizer plan, yield estimate, irrigation
//! schedule, pest/disease and weed advisories.
//!
//! The original system shipped this document as a hardcoded demo constant.
//! Here it is a typed contract read from the advisory store, with
//! [`FieldAdvisory::sample`] kept for fields that have no row yet and for
//! tests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::weather::WeatherData;

/// Nutrient application targets in kg/acre
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FertilizerPlan {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub sulfur: f64,
    pub zinc: f64,
    /// e.g. "Every 21 days"
    pub frequency: String,
    pub sources: Vec<String>,
}

/// Growth and yield estimation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldEstimate {
    pub expected_yield_per_acre: f64,
    /// Human-readable harvest window, e.g. "October 2024"
    pub harvesting_period: String,
}

/// One planned irrigation event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationEntry {
    pub date: NaiveDate,
    pub quantity_mm: f64,
    /// Local time of day, e.g. "06:00 AM"
    pub time: String,
    /// Rain probability percent known at planning time
    pub precipitation_probability: i32,
}

/// A pest or disease with its recommended treatment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentItem {
    pub name: String,
    pub treatment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PestAndDisease {
    pub diseases: Vec<TreatmentItem>,
    pub pests: Vec<TreatmentItem>,
}

/// A weed species with its control measure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeedItem {
    pub name: String,
    pub solution: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeedAdvisory {
    pub potential_weeds: Vec<WeedItem>,
}

/// Full advisory document for a field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldAdvisory {
    pub field_id: String,
    pub crop: String,
    pub fertilizer: FertilizerPlan,
    pub yield_estimate: YieldEstimate,
    pub irrigation: Vec<IrrigationEntry>,
    pub pest_and_disease: PestAndDisease,
    pub weeds: WeedAdvisory,
}

/// Rain probability at or above which irrigation should be postponed
pub const IRRIGATION_DELAY_THRESHOLD_PERCENT: i32 = 80;

/// An irrigation entry overlaid with the live forecast for its slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationDay {
    pub date: NaiveDate,
    pub quantity_mm: f64,
    pub time: String,
    pub precipitation_probability: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_celsius: Option<i32>,
    /// True when the rain probability makes watering wasteful
    pub delay_advised: bool,
}

impl FieldAdvisory {
    /// Overlay forecast days onto the irrigation schedule, positionally:
    /// the first scheduled event gets the first forecast day, and so on.
    /// Entries beyond the forecast keep their planned probability.
    pub fn irrigation_with_forecast(&self, weather: Option<&WeatherData>) -> Vec<IrrigationDay> {
        self.irrigation
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let forecast = weather.and_then(|w| w.daily.get(i));
                let probability = forecast
                    .map(|day| day.rain_percent())
                    .unwrap_or(entry.precipitation_probability);
                IrrigationDay {
                    date: entry.date,
                    quantity_mm: entry.quantity_mm,
                    time: entry.time.clone(),
                    precipitation_probability: probability,
                    weather_description: forecast.map(|day| day.description.clone()),
                    temperature_celsius: forecast.map(|day| day.day_celsius()),
                    delay_advised: probability >= IRRIGATION_DELAY_THRESHOLD_PERCENT,
                }
            })
            .collect()
    }

    /// Demo advisory document (apple orchard)
    pub fn sample(field_id: impl Into<String>) -> Self {
        let schedule = [
            (NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), 25.0, 20),
            (NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(), 30.0, 85),
            (NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(), 25.0, 45),
            (NaiveDate::from_ymd_opt(2024, 1, 18).unwrap(), 20.0, 10),
        ];

        Self {
            field_id: field_id.into(),
            crop: "Apple".to_string(),
            fertilizer: FertilizerPlan {
                nitrogen: 120.0,
                phosphorus: 60.0,
                potassium: 80.0,
                sulfur: 25.0,
                zinc: 5.0,
                frequency: "Every 21 days".to_string(),
                sources: vec![
                    "Urea".to_string(),
                    "Gypsum".to_string(),
                    "Potash".to_string(),
                    "Zinc Sulfate".to_string(),
                ],
            },
            yield_estimate: YieldEstimate {
                expected_yield_per_acre: 1200.0,
                harvesting_period: "October 2024".to_string(),
            },
            irrigation: schedule
                .into_iter()
                .map(|(date, quantity_mm, probability)| IrrigationEntry {
                    date,
                    quantity_mm,
                    time: "06:00 AM".to_string(),
                    precipitation_probability: probability,
                })
                .collect(),
            pest_and_disease: PestAndDisease {
                diseases: vec![
                    TreatmentItem {
                        name: "Early Leaf Spot".to_string(),
                        treatment: "Chlorothalonil".to_string(),
                    },
                    TreatmentItem {
                        name: "Collar Rot".to_string(),
                        treatment: "Carbendazim".to_string(),
                    },
                ],
                pests: vec![
                    TreatmentItem {
                        name: "Aphids".to_string(),
                        treatment: "Neem Oil".to_string(),
                    },
                    TreatmentItem {
                        name: "Thrips".to_string(),
                        treatment: "Spinosad".to_string(),
                    },
                ],
            },
            weeds: WeedAdvisory {
                potential_weeds: vec![
                    WeedItem {
                        name: "Amaranthus".to_string(),
                        solution: "Manual weeding".to_string(),
                    },
                    WeedItem {
                        name: "Cynodon dactylon".to_string(),
                        solution: "Mulching".to_string(),
                    },
                ],
            },
        }
    }
}
