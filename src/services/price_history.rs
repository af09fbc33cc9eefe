// src/services/price_history.rs

/// SVG path (`M x y L x y ...`) for a price series drawn in a `width` x `height` box.
/// The cheapest point sits on the bottom edge and the most expensive on the top.
pub fn svg_path(points: &[f64], width: f64, height: f64) -> String {
    if points.is_empty() {
        return String::new();
    }

    let min = points.iter().copied().fold(f64::INFINITY, f64::min);
    let max = points.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let y_for = |price: f64| {
        if range == 0.0 {
            height / 2.0
        } else {
            height - ((price - min) / range) * height
        }
    };

    if points.len() == 1 {
        let y = y_for(points[0]);
        return format!("M 0.00 {y:.2} L {width:.2} {y:.2}");
    }

    let step = width / (points.len() - 1) as f64;
    points
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            let command = if i == 0 { "M" } else { "L" };
            format!("{command} {:.2} {:.2}", i as f64 * step, y_for(price))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_between_min_and_max() {
        assert_eq!(
            svg_path(&[100.0, 50.0, 75.0], 200.0, 100.0),
            "M 0.00 0.00 L 100.00 100.00 L 200.00 50.00"
        );
    }

    #[test]
    fn flat_and_single_series() {
        assert_eq!(svg_path(&[10.0, 10.0], 100.0, 40.0), "M 0.00 20.00 L 100.00 20.00");
        assert_eq!(svg_path(&[10.0], 100.0, 40.0), "M 0.00 20.00 L 100.00 20.00");
        assert_eq!(svg_path(&[], 100.0, 40.0), "");
    }
}
