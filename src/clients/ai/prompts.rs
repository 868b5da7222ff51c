use crate::formatter::{LabeledValue, NormalizedView, RadiusView};

pub const REPORT_SYSTEM_PROMPT: &str = r#"You are a senior commercial real estate analyst who writes investment reports on raw land parcels for private investors and developers.

Write the report as clean HTML fragments (use <h2>, <h3>, <p>, <ul>, <li>, <strong>; no <html>, <head> or <body> tags, no inline styles, no markdown).

Structure the report with these sections, in order:
1. Executive Summary: two or three sentences on what the parcel is and whether it merits further diligence.
2. Location Overview: access, surrounding area and proximity to key amenities.
3. Pricing & Valuation: asking price, price per acre and how they compare with the assessed value and last sale.
4. Flood & Environmental Risk: flood zone, floodplain and wetland exposure and what they mean for buildable area.
5. Market Demographics: population, income and housing trends across the reported radii, calling out growth direction.
6. Investment Thesis: the most plausible uses (hold, subdivide, develop, lease) and why.
7. Key Risks: concrete risks an investor must diligence.
8. Recommendation: a clear, hedged recommendation with next steps.

Tone: professional, direct and evidence-based. Cite the figures you are given. Where a figure is "N/A", say the data is unavailable rather than guessing, and never invent numbers. Keep the report under 1,200 words."#;

const NO_NARRATIVE: &str = "No additional analyst notes were provided.";

fn section(title: &str, rows: &[(&str, &String)]) -> String {
    let mut out = format!("## {}", title);
    for (label, value) in rows {
        out.push_str(&format!("\n- {}: {}", label, value));
    }
    out
}

fn labeled_section(title: &str, values: &[LabeledValue]) -> String {
    let rows: Vec<(&str, &String)> = values.iter().map(|v| (v.label, &v.value)).collect();
    section(title, &rows)
}

fn demographics_section(ring: &RadiusView) -> String {
    let mut out = section(
        &format!("Demographics ({}-mile radius)", ring.radius.miles()),
        &[
            ("Population", &ring.population),
            ("Households", &ring.households),
            ("Median Household Income", &ring.median_household_income),
            ("Median Home Value", &ring.median_home_value),
            ("Median Age", &ring.median_age),
            ("Current Annual Population Growth", &ring.growth_current),
            ("Projected Annual Population Growth", &ring.growth_future),
        ],
    );
    if let Some(trend) = ring.growth_trend {
        out.push_str(&format!(
            "\n- Population Growth Trend: {} (current {} vs. projected {})",
            trend, ring.growth_current, ring.growth_future
        ));
    }
    out
}

/// Serializes the view into the user message for the report request.
pub fn build_report_prompt(view: &NormalizedView, narrative: Option<&str>) -> String {
    let mut sections = vec![
        "Prepare an investment analysis report for the land parcel described below. \
         Values marked N/A are unavailable."
            .to_string(),
        section(
            "Property Identity",
            &[
                ("Parcel ID", &view.parcel_id),
                ("Owner", &view.owner_name),
                ("Zoning", &view.zoning),
                ("Land Use", &view.land_use),
            ],
        ),
        section(
            "Location",
            &[
                ("Address", &view.address),
                ("City", &view.city),
                ("County", &view.county),
                ("State", &view.state),
                ("ZIP Code", &view.zip_code),
                ("Latitude", &view.latitude),
                ("Longitude", &view.longitude),
            ],
        ),
        section(
            "Price & Valuation",
            &[
                ("Asking Price", &view.sale_price),
                ("Land Area (acres)", &view.land_area_acres),
                ("Price per Acre", &view.price_per_acre),
                ("Assessed Value", &view.assessed_value),
                ("Last Sale Price", &view.last_sale_price),
                ("Last Sale Date", &view.last_sale_date),
            ],
        ),
        section(
            "Flood & Environmental Risk",
            &[
                ("FEMA Flood Zone", &view.flood_zone),
                ("Share of Parcel in Floodplain", &view.floodplain_coverage),
                ("Wetland Coverage", &view.wetland_coverage),
                ("Elevation", &view.elevation),
            ],
        ),
    ];

    sections.extend(view.radii.iter().map(demographics_section));

    for ring in &view.radii {
        sections.push(labeled_section(
            &format!("Household Income Distribution ({}-mile radius)", ring.radius.miles()),
            &ring.income_distribution,
        ));
    }

    for ring in &view.radii {
        sections.push(section(
            &format!("Housing Occupancy ({}-mile radius)", ring.radius.miles()),
            &[
                ("Total Housing Units", &ring.housing_units),
                ("Owner Occupied", &ring.owner_occupied_rate),
                ("Renter Occupied", &ring.renter_occupied_rate),
                ("Vacant", &ring.vacancy_rate),
            ],
        ));
    }

    sections.push(labeled_section("Distance to Amenities", &view.amenities));
    sections.push(labeled_section(
        "Percentile Rankings (0-100, relative to the state)",
        &view.percentiles,
    ));

    let narrative = narrative
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(NO_NARRATIVE);
    sections.push(format!("## Analyst Narrative\n{}", narrative));

    sections.join("\n\n")
}
