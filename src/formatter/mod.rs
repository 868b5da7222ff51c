//! Turns a raw [`PropertyRecord`] into display-ready strings.
//!
//! Nothing here fails: every value that cannot be computed is rendered as
//! [`NOT_AVAILABLE`], and growth trends that cannot be classified are left
//! out.

pub mod income;
pub mod numbers;
pub mod trend;

use serde::Serialize;

use crate::property::{PropertyRecord, Radius, RadiusFields};
pub use income::{income_share, IncomeBand, INCOME_BANDS};
pub use numbers::{
    calculate_percentage, format_currency, format_miles, format_number, format_percent,
    format_percentile, NOT_AVAILABLE,
};
pub use trend::{classify_growth, GrowthTrend};

use numbers::{num, text};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledValue {
    pub label: &'static str,
    pub value: String,
}

impl LabeledValue {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadiusView {
    pub radius: Radius,
    pub population: String,
    pub households: String,
    pub median_household_income: String,
    pub median_home_value: String,
    pub median_age: String,
    pub growth_current: String,
    pub growth_future: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_trend: Option<GrowthTrend>,
    pub income_distribution: Vec<LabeledValue>,
    pub housing_units: String,
    pub owner_occupied_rate: String,
    pub renter_occupied_rate: String,
    pub vacancy_rate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedView {
    pub parcel_id: String,
    pub owner_name: String,
    pub address: String,
    pub city: String,
    pub county: String,
    pub state: String,
    pub zip_code: String,
    pub latitude: String,
    pub longitude: String,

    pub sale_price: String,
    pub land_area_acres: String,
    pub price_per_acre: String,
    pub assessed_value: String,
    pub last_sale_price: String,
    pub last_sale_date: String,
    pub zoning: String,
    pub land_use: String,

    pub flood_zone: String,
    pub floodplain_coverage: String,
    pub wetland_coverage: String,
    pub elevation: String,

    pub radii: Vec<RadiusView>,
    pub amenities: Vec<LabeledValue>,
    pub percentiles: Vec<LabeledValue>,
}

pub fn normalize(record: &PropertyRecord) -> NormalizedView {
    let price = num(&record.sale_price);
    let acres = num(&record.land_area_acres);

    NormalizedView {
        parcel_id: text(&record.parcel_id),
        owner_name: text(&record.owner_name),
        address: text(&record.address),
        city: text(&record.city),
        county: text(&record.county),
        state: text(&record.state),
        zip_code: text(&record.zip_code),
        latitude: format_coordinate(num(&record.latitude)),
        longitude: format_coordinate(num(&record.longitude)),

        sale_price: format_currency(price, 0),
        land_area_acres: format_number(acres, 2),
        price_per_acre: price_per_acre(price, acres),
        assessed_value: format_currency(num(&record.assessed_value), 0),
        last_sale_price: format_currency(num(&record.last_sale_price), 0),
        last_sale_date: text(&record.last_sale_date),
        zoning: text(&record.zoning),
        land_use: text(&record.land_use),

        flood_zone: text(&record.flood_zone),
        floodplain_coverage: format_percent(num(&record.percent_in_floodplain)),
        wetland_coverage: format_percent(num(&record.wetland_coverage)),
        elevation: match num(&record.elevation_ft) {
            Some(ft) => format!("{} ft", format_number(Some(ft), 0)),
            None => NOT_AVAILABLE.to_string(),
        },

        radii: Radius::ALL
            .iter()
            .map(|&radius| normalize_radius(radius, record.radius(radius)))
            .collect(),
        amenities: vec![
            LabeledValue::new("Highway", format_miles(num(&record.distance_to_highway))),
            LabeledValue::new("Hospital", format_miles(num(&record.distance_to_hospital))),
            LabeledValue::new("School", format_miles(num(&record.distance_to_school))),
            LabeledValue::new("Grocery", format_miles(num(&record.distance_to_grocery))),
            LabeledValue::new("Airport", format_miles(num(&record.distance_to_airport))),
        ],
        percentiles: vec![
            LabeledValue::new(
                "Population Growth",
                format_percentile(&record.population_growth_percentile),
            ),
            LabeledValue::new("Household Income", format_percentile(&record.income_percentile)),
            LabeledValue::new("Home Value", format_percentile(&record.home_value_percentile)),
            LabeledValue::new("Education", format_percentile(&record.education_percentile)),
        ],
    }
}

/// `price / acres` as whole dollars; unavailable for zero acreage.
pub fn price_per_acre(price: Option<f64>, acres: Option<f64>) -> String {
    match (price, acres) {
        (Some(price), Some(acres)) if acres != 0.0 => format_currency(Some(price / acres), 0),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn format_coordinate(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.6}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn normalize_radius(radius: Radius, fields: &RadiusFields) -> RadiusView {
    let households = num(&fields.households);
    let housing_units = num(&fields.housing_units);
    let growth_current = num(&fields.growth_current);
    let growth_future = num(&fields.growth_future);
    let counts: Vec<Option<f64>> = fields.income_bins.iter().map(num).collect();

    RadiusView {
        radius,
        population: format_number(num(&fields.population), 0),
        households: format_number(households, 0),
        median_household_income: format_currency(num(&fields.median_household_income), 0),
        median_home_value: format_currency(num(&fields.median_home_value), 0),
        median_age: format_number(num(&fields.median_age), 1),
        growth_current: format_percent(growth_current),
        growth_future: format_percent(growth_future),
        growth_trend: classify_growth(growth_current, growth_future),
        income_distribution: INCOME_BANDS
            .iter()
            .map(|band| {
                let share = income_share(&counts, households, band.min, band.max);
                LabeledValue::new(band.label, format_percent(share))
            })
            .collect(),
        housing_units: format_number(housing_units, 0),
        owner_occupied_rate: calculate_percentage(num(&fields.owner_occupied), housing_units),
        renter_occupied_rate: calculate_percentage(num(&fields.renter_occupied), housing_units),
        vacancy_rate: calculate_percentage(num(&fields.vacant_units), housing_units),
    }
}
