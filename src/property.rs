//! Schema for the flat parcel record posted by clients.
//!
//! The wire format is a single JSON object whose keys follow the upstream
//! parcel dataset (`For_Sale_Price`, `Land_Area_AC`, `Population_3mi`, ...).
//! Every field is optional and kept as a raw [`FieldValue`]; parsing and
//! sentinel substitution happen in [`crate::formatter`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A raw value as it arrived on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(Value),
}

impl FieldValue {
    /// Numeric reading of the value. Text is accepted with currency symbols,
    /// thousands separators and a trailing percent sign.
    pub fn as_f64(&self) -> Option<f64> {
        let parsed = match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => {
                let cleaned: String = s
                    .trim()
                    .chars()
                    .filter(|c| !matches!(c, '$' | ',' | '%') && !c.is_whitespace())
                    .collect();
                cleaned.parse::<f64>().ok()
            }
            FieldValue::Other(_) => None,
        };
        parsed.filter(|n| n.is_finite())
    }

    /// Display reading of the value; `None` for blanks, nulls and containers.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            FieldValue::Number(n) if !n.is_finite() => None,
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Other(Value::Bool(b)) => Some(b.to_string()),
            FieldValue::Other(_) => None,
        }
    }
}

/// Distance rings around the parcel for which demographics are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Radius {
    #[serde(rename = "1mi")]
    One,
    #[serde(rename = "3mi")]
    Three,
    #[serde(rename = "5mi")]
    Five,
}

impl Radius {
    pub const ALL: [Radius; 3] = [Radius::One, Radius::Three, Radius::Five];

    pub fn miles(self) -> u32 {
        match self {
            Radius::One => 1,
            Radius::Three => 3,
            Radius::Five => 5,
        }
    }

    /// Key suffix used by the dataset, e.g. `Population_3mi`.
    pub fn suffix(self) -> &'static str {
        match self {
            Radius::One => "1mi",
            Radius::Three => "3mi",
            Radius::Five => "5mi",
        }
    }

    fn index(self) -> usize {
        match self {
            Radius::One => 0,
            Radius::Three => 1,
            Radius::Five => 2,
        }
    }
}

/// A household-income bin of the census breakdown. `upper` is exclusive;
/// the top bin is open-ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomeBin {
    pub key: &'static str,
    pub lower: f64,
    pub upper: Option<f64>,
}

pub const INCOME_BIN_COUNT: usize = 9;

pub const INCOME_BINS: [IncomeBin; INCOME_BIN_COUNT] = [
    IncomeBin { key: "HH_Income_Under_15K", lower: 0.0, upper: Some(15_000.0) },
    IncomeBin { key: "HH_Income_15K_25K", lower: 15_000.0, upper: Some(25_000.0) },
    IncomeBin { key: "HH_Income_25K_35K", lower: 25_000.0, upper: Some(35_000.0) },
    IncomeBin { key: "HH_Income_35K_50K", lower: 35_000.0, upper: Some(50_000.0) },
    IncomeBin { key: "HH_Income_50K_75K", lower: 50_000.0, upper: Some(75_000.0) },
    IncomeBin { key: "HH_Income_75K_100K", lower: 75_000.0, upper: Some(100_000.0) },
    IncomeBin { key: "HH_Income_100K_150K", lower: 100_000.0, upper: Some(150_000.0) },
    IncomeBin { key: "HH_Income_150K_200K", lower: 150_000.0, upper: Some(200_000.0) },
    IncomeBin { key: "HH_Income_200K_Plus", lower: 200_000.0, upper: None },
];

/// Fields reported once per [`Radius`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadiusFields {
    pub population: Option<FieldValue>,
    pub households: Option<FieldValue>,
    pub median_household_income: Option<FieldValue>,
    pub median_home_value: Option<FieldValue>,
    pub median_age: Option<FieldValue>,
    pub growth_current: Option<FieldValue>,
    pub growth_future: Option<FieldValue>,
    pub housing_units: Option<FieldValue>,
    pub owner_occupied: Option<FieldValue>,
    pub renter_occupied: Option<FieldValue>,
    pub vacant_units: Option<FieldValue>,
    /// Household counts aligned with [`INCOME_BINS`].
    pub income_bins: [Option<FieldValue>; INCOME_BIN_COUNT],
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "HashMap<String, FieldValue>")]
pub struct PropertyRecord {
    pub parcel_id: Option<FieldValue>,
    pub owner_name: Option<FieldValue>,
    pub address: Option<FieldValue>,
    pub city: Option<FieldValue>,
    pub county: Option<FieldValue>,
    pub state: Option<FieldValue>,
    pub zip_code: Option<FieldValue>,
    pub latitude: Option<FieldValue>,
    pub longitude: Option<FieldValue>,

    pub sale_price: Option<FieldValue>,
    pub land_area_acres: Option<FieldValue>,
    pub assessed_value: Option<FieldValue>,
    pub last_sale_price: Option<FieldValue>,
    pub last_sale_date: Option<FieldValue>,
    pub zoning: Option<FieldValue>,
    pub land_use: Option<FieldValue>,

    pub flood_zone: Option<FieldValue>,
    pub percent_in_floodplain: Option<FieldValue>,
    pub wetland_coverage: Option<FieldValue>,
    pub elevation_ft: Option<FieldValue>,

    pub distance_to_highway: Option<FieldValue>,
    pub distance_to_hospital: Option<FieldValue>,
    pub distance_to_school: Option<FieldValue>,
    pub distance_to_grocery: Option<FieldValue>,
    pub distance_to_airport: Option<FieldValue>,

    pub population_growth_percentile: Option<FieldValue>,
    pub income_percentile: Option<FieldValue>,
    pub home_value_percentile: Option<FieldValue>,
    pub education_percentile: Option<FieldValue>,

    radii: [RadiusFields; 3],
}

impl PropertyRecord {
    pub fn radius(&self, radius: Radius) -> &RadiusFields {
        &self.radii[radius.index()]
    }
}

impl From<HashMap<String, FieldValue>> for PropertyRecord {
    fn from(mut fields: HashMap<String, FieldValue>) -> Self {
        let mut take = |key: &str| fields.remove(key);

        let mut record = PropertyRecord {
            parcel_id: take("Parcel_ID"),
            owner_name: take("Owner_Name"),
            address: take("Property_Address"),
            city: take("City"),
            county: take("County"),
            state: take("State"),
            zip_code: take("Zip_Code"),
            latitude: take("Latitude"),
            longitude: take("Longitude"),
            sale_price: take("For_Sale_Price"),
            land_area_acres: take("Land_Area_AC"),
            assessed_value: take("Assessed_Value"),
            last_sale_price: take("Last_Sale_Price"),
            last_sale_date: take("Last_Sale_Date"),
            zoning: take("Zoning"),
            land_use: take("Land_Use"),
            flood_zone: take("Flood_Zone"),
            percent_in_floodplain: take("Percent_In_Floodplain"),
            wetland_coverage: take("Wetland_Coverage"),
            elevation_ft: take("Elevation_FT"),
            distance_to_highway: take("Distance_To_Highway_MI"),
            distance_to_hospital: take("Distance_To_Hospital_MI"),
            distance_to_school: take("Distance_To_School_MI"),
            distance_to_grocery: take("Distance_To_Grocery_MI"),
            distance_to_airport: take("Distance_To_Airport_MI"),
            population_growth_percentile: take("Population_Growth_Percentile"),
            income_percentile: take("Income_Percentile"),
            home_value_percentile: take("Home_Value_Percentile"),
            education_percentile: take("Education_Percentile"),
            radii: Default::default(),
        };

        for radius in Radius::ALL {
            let mut take_at = |base: &str| take(&format!("{}_{}", base, radius.suffix()));
            let mut ring = RadiusFields {
                population: take_at("Population"),
                households: take_at("Households"),
                median_household_income: take_at("Median_Household_Income"),
                median_home_value: take_at("Median_Home_Value"),
                median_age: take_at("Median_Age"),
                growth_current: take_at("Population_Growth_Current"),
                growth_future: take_at("Population_Growth_Future"),
                housing_units: take_at("Total_Housing_Units"),
                owner_occupied: take_at("Owner_Occupied"),
                renter_occupied: take_at("Renter_Occupied"),
                vacant_units: take_at("Vacant_Units"),
                income_bins: Default::default(),
            };
            for (slot, bin) in ring.income_bins.iter_mut().zip(INCOME_BINS.iter()) {
                *slot = take_at(bin.key);
            }
            record.radii[radius.index()] = ring;
        }

        record
    }
}
