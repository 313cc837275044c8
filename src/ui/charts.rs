use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::color::{outcome_color, SiteColors};
use crate::state::AppState;
use crate::view::{PieSpec, ScatterSpec, SliceKey};

// ---------------------------------------------------------------------------
// Central panel – pie + scatter
// ---------------------------------------------------------------------------

/// Render both chart regions for the current selection.
pub fn charts_panel(ui: &mut Ui, state: &AppState) {
    let Some(render) = &state.render else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a launch records file to begin  (File → Open…)");
        });
        return;
    };

    let chart_height = ((ui.available_height() - 60.0) / 2.0).max(140.0);

    match &render.pie {
        Some(pie) => pie_chart(ui, pie, &state.site_colors, chart_height),
        None => {
            ui.label("Select a launch site to see the success distribution.");
        }
    }

    ui.separator();

    scatter_chart(ui, &render.scatter, &state.site_colors, chart_height);
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

fn slice_color(key: &SliceKey, colors: &SiteColors) -> Color32 {
    match key {
        SliceKey::Site(name) => colors.color_for(name),
        SliceKey::Outcome(outcome) => outcome_color(*outcome),
    }
}

fn pie_chart(ui: &mut Ui, spec: &PieSpec, colors: &SiteColors, height: f32) {
    ui.strong(&spec.title);

    let total: usize = spec.slices.iter().map(|s| s.count).sum();
    if total == 0 {
        ui.label("No launches in the current view.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let side = height.min(ui.available_width() * 0.5);
        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
        let rect = response.rect;
        let center = rect.center();
        let radius = rect.width().min(rect.height()) * 0.48;

        // Wedges start at 12 o'clock and run clockwise.
        let mut start = -FRAC_PI_2;
        for slice in &spec.slices {
            let sweep = (slice.count as f32 / total as f32) * TAU;
            painter.add(wedge(center, radius, start, sweep, slice_color(&slice.key, colors)));
            start += sweep;
        }

        // Manual legend with percentages next to the pie.
        ui.vertical(|ui: &mut Ui| {
            for slice in &spec.slices {
                let pct = 100.0 * slice.count as f64 / total as f64;
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, swatch_painter) =
                        ui.allocate_painter(Vec2::splat(12.0), Sense::hover());
                    swatch_painter.rect_filled(swatch.rect, 2.0, slice_color(&slice.key, colors));
                    ui.label(format!("{} – {pct:.1}% ({})", slice.key.label(), slice.count));
                });
            }
        });
    });
}

/// A filled circular sector approximated by a point fan.
fn wedge(center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) -> Shape {
    // ~3 degrees per segment keeps the arc smooth at any slice size.
    let steps = (sweep / 0.05).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for i in 0..=steps {
        let angle = start + sweep * i as f32 / steps as f32;
        points.push(center + radius * Vec2::new(angle.cos(), angle.sin()));
    }
    Shape::convex_polygon(points, color, Stroke::NONE)
}

// ---------------------------------------------------------------------------
// Scatter plot
// ---------------------------------------------------------------------------

fn scatter_chart(ui: &mut Ui, spec: &ScatterSpec, colors: &SiteColors, height: f32) {
    ui.strong(&spec.title);

    // One point group per site so each site gets a legend entry and colour.
    let mut by_site: std::collections::BTreeMap<&str, Vec<[f64; 2]>> =
        std::collections::BTreeMap::new();
    for point in &spec.points {
        by_site
            .entry(point.site.as_str())
            .or_default()
            .push([point.payload_kg, point.outcome.class() as f64]);
    }

    Plot::new("payload_scatter")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Launch outcome (0 = failure, 1 = success)")
        .include_y(-0.25)
        .include_y(1.25)
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("payload = {:.0} kg", value.x)
            } else {
                format!("{name}\npayload = {:.0} kg\noutcome = {:.0}", value.x, value.y)
            }
        })
        .show(ui, |plot_ui| {
            for (site, points) in by_site {
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(site)
                        .color(colors.color_for(site))
                        .radius(3.5)
                        .filled(true),
                );
            }
        });
}
