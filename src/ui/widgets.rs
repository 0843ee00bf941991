use eframe::egui::{Align2, FontId, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2};

use crate::data::filter::PayloadRange;

// ---------------------------------------------------------------------------
// Payload range slider
// ---------------------------------------------------------------------------

const HANDLE_RADIUS: f32 = 7.0;
const TICK_LENGTH: f32 = 5.0;

/// Snap a value onto the `step` grid, clamped into `[min, max]`.
fn snap_to_step(value: f64, step: f64, min: f64, max: f64) -> f64 {
    ((value / step).round() * step).clamp(min, max)
}

/// Dual-handle slider for an inclusive payload interval.
///
/// Handles snap to `step` when dragged and cannot cross; tick marks are
/// drawn at every step between `min` and `max`. The initial range may sit
/// off the step grid (it is seeded from the dataset bounds) and only moves
/// onto it once a handle is dragged.
pub fn range_slider(
    ui: &mut Ui,
    range: &mut PayloadRange,
    min: f64,
    max: f64,
    step: f64,
) -> Response {
    let width = ui.available_width();
    let (rect, mut response) = ui.allocate_exact_size(Vec2::new(width, 44.0), Sense::hover());

    let rail_y = rect.top() + 14.0;
    let left = rect.left() + HANDLE_RADIUS;
    let right = rect.right() - HANDLE_RADIUS;
    let span = (max - min).max(f64::EPSILON);

    let to_x = |value: f64| -> f32 {
        let t = ((value - min) / span).clamp(0.0, 1.0) as f32;
        left + t * (right - left)
    };
    let to_value = |x: f32| -> f64 {
        let t = (((x - left) / (right - left)).clamp(0.0, 1.0)) as f64;
        min + t * span
    };
    let handle_rect = |value: f64| {
        Rect::from_center_size(
            Pos2::new(to_x(value), rail_y),
            Vec2::splat(HANDLE_RADIUS * 2.0 + 4.0),
        )
    };

    let mut changed = false;

    // Interactions first so the handles are painted at their new positions.
    let lo_resp = ui.interact(handle_rect(range.lo), response.id.with("lo"), Sense::drag());
    if lo_resp.dragged() {
        if let Some(pos) = lo_resp.interact_pointer_pos() {
            let value = snap_to_step(to_value(pos.x), step, min, max).min(range.hi);
            if value != range.lo {
                range.lo = value;
                changed = true;
            }
        }
    }

    let hi_resp = ui.interact(handle_rect(range.hi), response.id.with("hi"), Sense::drag());
    if hi_resp.dragged() {
        if let Some(pos) = hi_resp.interact_pointer_pos() {
            let value = snap_to_step(to_value(pos.x), step, min, max).max(range.lo);
            if value != range.hi {
                range.hi = value;
                changed = true;
            }
        }
    }

    // ---- Painting ----
    let painter = ui.painter_at(rect);
    let visuals = ui.visuals();

    painter.line_segment(
        [Pos2::new(left, rail_y), Pos2::new(right, rail_y)],
        Stroke::new(4.0, visuals.widgets.inactive.bg_fill),
    );
    painter.line_segment(
        [
            Pos2::new(to_x(range.lo), rail_y),
            Pos2::new(to_x(range.hi), rail_y),
        ],
        Stroke::new(4.0, visuals.selection.bg_fill),
    );

    // Tick marks at every step; labels on every other tick to stay legible.
    let n_ticks = (span / step).round() as i64;
    for i in 0..=n_ticks {
        let value = min + i as f64 * step;
        let x = to_x(value);
        painter.line_segment(
            [
                Pos2::new(x, rail_y + 6.0),
                Pos2::new(x, rail_y + 6.0 + TICK_LENGTH),
            ],
            Stroke::new(1.0, visuals.weak_text_color()),
        );
        if i % 2 == 0 {
            painter.text(
                Pos2::new(x, rail_y + 7.0 + TICK_LENGTH),
                Align2::CENTER_TOP,
                format!("{value:.0}"),
                FontId::proportional(9.0),
                visuals.weak_text_color(),
            );
        }
    }

    for (value, resp) in [(range.lo, &lo_resp), (range.hi, &hi_resp)] {
        let center = Pos2::new(to_x(value), rail_y);
        let fill = if resp.hovered() || resp.dragged() {
            visuals.widgets.hovered.bg_fill
        } else {
            visuals.widgets.active.bg_fill
        };
        painter.circle_filled(center, HANDLE_RADIUS, fill);
        painter.circle_stroke(center, HANDLE_RADIUS, Stroke::new(1.5, visuals.selection.stroke.color));
    }

    if changed {
        response.mark_changed();
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapping_lands_on_the_step_grid() {
        assert_eq!(snap_to_step(2400.0, 1000.0, 0.0, 10_000.0), 2000.0);
        assert_eq!(snap_to_step(2600.0, 1000.0, 0.0, 10_000.0), 3000.0);
        assert_eq!(snap_to_step(0.0, 1000.0, 0.0, 10_000.0), 0.0);
    }

    #[test]
    fn snapping_clamps_to_the_slider_bounds() {
        assert_eq!(snap_to_step(-500.0, 1000.0, 0.0, 10_000.0), 0.0);
        assert_eq!(snap_to_step(12_000.0, 1000.0, 0.0, 10_000.0), 10_000.0);
    }
}
