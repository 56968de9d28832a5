use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::state::AppState;

/// How many of the best-ranked records the chart shows.
const TOP_N: usize = 20;

// ---------------------------------------------------------------------------
// Score chart (bottom panel)
// ---------------------------------------------------------------------------

/// Bar chart of the top-ranked scores, coloured by the colour-by dimension.
pub fn score_chart(ui: &mut Ui, state: &AppState) {
    let Some(ranking) = &state.ranking else {
        ui.label("No ranking yet.");
        return;
    };

    let mut top: Vec<_> = ranking.rows.iter().filter(|s| s.rank <= TOP_N).collect();
    top.sort_by_key(|s| s.rank);

    let bars: Vec<Bar> = top
        .iter()
        .map(|scored| {
            let group = scored.record.dimension(state.color_dimension);
            let color = state
                .color_map
                .as_ref()
                .map(|cm| cm.color_for(group))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(scored.rank as f64, scored.score)
                .name(format!("#{} {}", scored.rank, group.unwrap_or("")))
                .fill(color)
                .width(0.8)
        })
        .collect();

    Plot::new("score_chart")
        .legend(Legend::default())
        .x_axis_label("Rank")
        .y_axis_label("Score")
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(format!("Top {TOP_N}")));
        });
}
