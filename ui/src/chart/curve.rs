//! Monotone cubic interpolation (Fritsch-Carlson) for line series.

use super::scene::num;

/// SVG path through `points`. Non-finite `y` values break the line into segments.
pub fn monotone_path(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for segment in points
        .split(|(_, y)| !y.is_finite())
        .filter(|segment| !segment.is_empty())
    {
        if !d.is_empty() {
            d.push(' ');
        }
        d.push_str(&segment_path(segment));
    }
    d
}

fn segment_path(points: &[(f64, f64)]) -> String {
    let (x0, y0) = points[0];
    let mut d = format!("M{},{}", num(x0), num(y0));

    match points.len() {
        1 => return d,
        2 => {
            let (x1, y1) = points[1];
            d.push_str(&format!("L{},{}", num(x1), num(y1)));
            return d;
        }
        _ => {}
    }

    let tangents = tangents(points);
    for (i, window) in points.windows(2).enumerate() {
        let (xa, ya) = window[0];
        let (xb, yb) = window[1];
        let h = (xb - xa) / 3.0;
        d.push_str(&format!(
            "C{},{} {},{} {},{}",
            num(xa + h),
            num(ya + tangents[i] * h),
            num(xb - h),
            num(yb - tangents[i + 1] * h),
            num(xb),
            num(yb)
        ));
    }
    d
}

fn tangents(points: &[(f64, f64)]) -> Vec<f64> {
    let n = points.len();
    let secants: Vec<f64> = points
        .windows(2)
        .map(|w| {
            let dx = w[1].0 - w[0].0;
            if dx == 0.0 {
                0.0
            } else {
                (w[1].1 - w[0].1) / dx
            }
        })
        .collect();

    let mut m = vec![0.0; n];
    m[0] = secants[0];
    m[n - 1] = secants[n - 2];
    for i in 1..n - 1 {
        m[i] = if secants[i - 1] * secants[i] <= 0.0 {
            0.0
        } else {
            (secants[i - 1] + secants[i]) / 2.0
        };
    }

    for (i, &delta) in secants.iter().enumerate() {
        if delta == 0.0 {
            m[i] = 0.0;
            m[i + 1] = 0.0;
            continue;
        }
        let a = m[i] / delta;
        let b = m[i + 1] / delta;
        let s = a * a + b * b;
        if s > 9.0 {
            let t = 3.0 / s.sqrt();
            m[i] = t * a * delta;
            m[i + 1] = t * b * delta;
        }
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_points_draw_a_straight_line() {
        assert_eq!(monotone_path(&[(0.0, 0.0), (10.0, 5.0)]), "M0,0L10,5");
    }

    #[test]
    fn flat_runs_stay_flat() {
        let d = monotone_path(&[(0.0, 5.0), (10.0, 5.0), (20.0, 5.0)]);
        assert_eq!(d, "M0,5C3.33,5 6.67,5 10,5C13.33,5 16.67,5 20,5");
    }

    #[test]
    fn nan_splits_segments() {
        let d = monotone_path(&[(0.0, 1.0), (10.0, 2.0), (20.0, f64::NAN), (30.0, 4.0)]);
        assert_eq!(d, "M0,1L10,2 M30,4");
    }

    #[test]
    fn all_missing_yields_empty_path() {
        assert!(monotone_path(&[(0.0, f64::NAN)]).is_empty());
    }
}
