use crate::core::ballistics::FlightResult;

pub const DISTANCE_TO_HEIGHT_RATIO: f64 = 2.0; // x:y data window ratio

const X_PADDING_RATIO: f64 = 0.06;
const Y_PADDING_RATIO: f64 = 0.10;
const MIN_SPAN_M: f64 = 1.0;

fn padded_span(extent_m: f64, padding_ratio: f64) -> f64 {
    let pad = extent_m.max(MIN_SPAN_M) * padding_ratio;
    (extent_m + pad).max(MIN_SPAN_M)
}

/// Chart window `(x_span, y_span)` for a flight: range and peak height padded,
/// then the narrower axis stretched to hold the fixed x:y ratio.
pub fn flight_axis_window(flight: &FlightResult) -> (f64, f64) {
    let x_span = padded_span(flight.range_m(), X_PADDING_RATIO);
    let y_span = padded_span(flight.max_height_m(), Y_PADDING_RATIO);

    if x_span < y_span * DISTANCE_TO_HEIGHT_RATIO {
        (y_span * DISTANCE_TO_HEIGHT_RATIO, y_span)
    } else {
        (x_span, x_span / DISTANCE_TO_HEIGHT_RATIO)
    }
}
