//! Inline SVG renderings of the current tallies.
//!
//! Every chart is a pure function of the option list. Bars and rows take the
//! palette color of their option's position; pie slices take the color of
//! their position among the options that have votes.

use crate::models::SurveyOption;
use crate::survey::color_for;
use crate::ui::escape_html;

pub const LINE_STROKE: &str = "#8884d8";

const WIDTH: f64 = 600.0;
const TICK_COUNT: u64 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice<'a> {
    pub name: &'a str,
    pub count: u64,
    pub percent: u64,
    pub color: &'static str,
    /// Start and end of the slice as fractions of a full turn, clockwise from 12 o'clock.
    pub start: f64,
    pub end: f64,
}

pub fn pie_slices(options: &[SurveyOption]) -> Vec<PieSlice<'_>> {
    let total = options
        .iter()
        .fold(0u64, |sum, option| sum.saturating_add(option.count));
    if total == 0 {
        return Vec::new();
    }

    let mut cursor = 0.0;
    options
        .iter()
        .filter(|option| option.count > 0)
        .enumerate()
        .map(|(index, option)| {
            let share = option.count as f64 / total as f64;
            let slice = PieSlice {
                name: &option.name,
                count: option.count,
                percent: (share * 100.0).round() as u64,
                color: color_for(index),
                start: cursor,
                end: cursor + share,
            };
            cursor += share;
            slice
        })
        .collect()
}

/// Evenly spaced axis ticks from zero that cover `max`.
pub fn axis_ticks(max: u64) -> Vec<u64> {
    let step = max.div_ceil(TICK_COUNT).max(1);
    (0..=TICK_COUNT).map(|i| i.saturating_mul(step)).collect()
}

pub fn horizontal_chart_height(option_count: usize) -> u32 {
    (option_count as u32).saturating_mul(50).max(200)
}

struct Plot {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Plot {
    fn width(&self) -> f64 {
        self.right - self.left
    }

    fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

fn open_svg(height: f64, label: &str) -> String {
    format!(
        r#"<svg class="chart" viewBox="0 0 {WIDTH} {height}" role="img" aria-label="{label}">"#
    )
}

fn tooltip(option: &SurveyOption) -> String {
    format!("<title>{}: {} votes</title>", escape_html(&option.name), option.count)
}

fn max_count(options: &[SurveyOption]) -> u64 {
    options.iter().map(|option| option.count).max().unwrap_or(0)
}

fn value_grid(svg: &mut String, plot: &Plot, ticks: &[u64]) {
    let top_value = ticks.last().copied().unwrap_or(1).max(1) as f64;
    for &tick in ticks {
        let y = plot.bottom - tick as f64 / top_value * plot.height();
        svg.push_str(&format!(
            r#"<line class="chart-grid" x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" />"#,
            plot.left, plot.right
        ));
        svg.push_str(&format!(
            r#"<text class="chart-label" x="{:.2}" y="{:.2}" text-anchor="end">{tick}</text>"#,
            plot.left - 8.0,
            y + 4.0
        ));
    }
}

fn category_labels(svg: &mut String, plot: &Plot, options: &[SurveyOption], x_at: impl Fn(usize) -> f64) {
    for (index, option) in options.iter().enumerate() {
        let x = x_at(index);
        let y = plot.bottom + 14.0;
        svg.push_str(&format!(
            r#"<text class="chart-label" x="{x:.2}" y="{y:.2}" text-anchor="end" transform="rotate(-45 {x:.2} {y:.2})">{}</text>"#,
            escape_html(&option.name)
        ));
    }
}

pub fn bar_chart(options: &[SurveyOption]) -> String {
    let height = 250.0;
    let plot = Plot {
        left: 44.0,
        right: WIDTH - 16.0,
        top: 16.0,
        bottom: height - 70.0,
    };
    let ticks = axis_ticks(max_count(options));
    let top_value = *ticks.last().unwrap_or(&1) as f64;
    let slot = plot.width() / options.len().max(1) as f64;
    let bar_width = slot * 0.6;

    let mut svg = open_svg(height, "Bar chart of votes");
    value_grid(&mut svg, &plot, &ticks);
    for (index, option) in options.iter().enumerate() {
        let bar_height = option.count as f64 / top_value * plot.height();
        let x = plot.left + index as f64 * slot + (slot - bar_width) / 2.0;
        svg.push_str(&format!(
            r#"<rect class="chart-bar" x="{x:.2}" y="{:.2}" width="{bar_width:.2}" height="{bar_height:.2}" rx="6" fill="{}">{}</rect>"#,
            plot.bottom - bar_height,
            color_for(index),
            tooltip(option)
        ));
    }
    category_labels(&mut svg, &plot, options, |index| {
        plot.left + (index as f64 + 0.5) * slot
    });
    svg.push_str("</svg>");
    svg
}

pub fn line_chart(options: &[SurveyOption]) -> String {
    let height = 250.0;
    let plot = Plot {
        left: 44.0,
        right: WIDTH - 24.0,
        top: 16.0,
        bottom: height - 70.0,
    };
    let ticks = axis_ticks(max_count(options));
    let top_value = *ticks.last().unwrap_or(&1) as f64;
    let x_at = |index: usize| {
        if options.len() > 1 {
            plot.left + index as f64 * plot.width() / (options.len() - 1) as f64
        } else {
            plot.left + plot.width() / 2.0
        }
    };
    let y_at = |count: u64| plot.bottom - count as f64 / top_value * plot.height();

    let mut svg = open_svg(height, "Line chart of votes");
    value_grid(&mut svg, &plot, &ticks);

    let path = options
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let command = if index == 0 { 'M' } else { 'L' };
            format!("{command} {:.2} {:.2}", x_at(index), y_at(option.count))
        })
        .collect::<Vec<_>>()
        .join(" ");
    svg.push_str(&format!(
        r#"<path class="chart-line" d="{path}" fill="none" stroke="{LINE_STROKE}" stroke-width="2" />"#
    ));
    for (index, option) in options.iter().enumerate() {
        svg.push_str(&format!(
            r#"<circle class="chart-point" cx="{:.2}" cy="{:.2}" r="4" fill="white" stroke="{LINE_STROKE}" stroke-width="2">{}</circle>"#,
            x_at(index),
            y_at(option.count),
            tooltip(option)
        ));
    }
    category_labels(&mut svg, &plot, options, x_at);
    svg.push_str("</svg>");
    svg
}

pub fn horizontal_bar_chart(options: &[SurveyOption]) -> String {
    let height = f64::from(horizontal_chart_height(options.len()));
    let plot = Plot {
        left: 90.0,
        right: WIDTH - 16.0,
        top: 8.0,
        bottom: height - 28.0,
    };
    let ticks = axis_ticks(max_count(options));
    let top_value = *ticks.last().unwrap_or(&1) as f64;
    let row = plot.height() / options.len().max(1) as f64;
    let bar_height = row * 0.6;

    let mut svg = open_svg(height, "Horizontal bar chart of votes");
    for &tick in &ticks {
        let x = plot.left + tick as f64 / top_value * plot.width();
        svg.push_str(&format!(
            r#"<line class="chart-grid" x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}" />"#,
            plot.top, plot.bottom
        ));
        svg.push_str(&format!(
            r#"<text class="chart-label" x="{x:.2}" y="{:.2}" text-anchor="middle">{tick}</text>"#,
            plot.bottom + 18.0
        ));
    }
    for (index, option) in options.iter().enumerate() {
        let y = plot.top + index as f64 * row + (row - bar_height) / 2.0;
        let bar_width = option.count as f64 / top_value * plot.width();
        svg.push_str(&format!(
            r#"<rect class="chart-bar" x="{:.2}" y="{y:.2}" width="{bar_width:.2}" height="{bar_height:.2}" rx="6" fill="{}">{}</rect>"#,
            plot.left,
            color_for(index),
            tooltip(option)
        ));
        svg.push_str(&format!(
            r#"<text class="chart-label" x="{:.2}" y="{:.2}" text-anchor="end">{}</text>"#,
            plot.left - 8.0,
            y + bar_height / 2.0 + 4.0,
            escape_html(&option.name)
        ));
    }
    svg.push_str("</svg>");
    svg
}

fn point_on_circle(cx: f64, cy: f64, radius: f64, turn: f64) -> (f64, f64) {
    let angle = turn * std::f64::consts::TAU - std::f64::consts::FRAC_PI_2;
    (cx + radius * angle.cos(), cy + radius * angle.sin())
}

pub fn pie_chart(options: &[SurveyOption]) -> String {
    let height = 280.0;
    let (cx, cy, radius) = (WIDTH / 2.0, height / 2.0, 100.0);

    let mut svg = open_svg(height, "Pie chart of votes");
    for slice in pie_slices(options) {
        let title = format!(
            "<title>{}: {} votes</title>",
            escape_html(slice.name),
            slice.count
        );
        if slice.end - slice.start >= 1.0 - f64::EPSILON {
            svg.push_str(&format!(
                r#"<circle class="chart-slice" cx="{cx:.2}" cy="{cy:.2}" r="{radius:.2}" fill="{}">{title}</circle>"#,
                slice.color
            ));
        } else {
            let (x0, y0) = point_on_circle(cx, cy, radius, slice.start);
            let (x1, y1) = point_on_circle(cx, cy, radius, slice.end);
            let large_arc = u8::from(slice.end - slice.start > 0.5);
            svg.push_str(&format!(
                r#"<path class="chart-slice" d="M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {radius:.2} {radius:.2} 0 {large_arc} 1 {x1:.2} {y1:.2} Z" fill="{}">{title}</path>"#,
                slice.color
            ));
        }

        let middle = (slice.start + slice.end) / 2.0;
        let (lx, ly) = point_on_circle(cx, cy, radius * 1.25, middle);
        let anchor = if lx >= cx { "start" } else { "end" };
        svg.push_str(&format!(
            r#"<text class="chart-label pie-label" x="{lx:.2}" y="{ly:.2}" text-anchor="{anchor}">{}: {}%</text>"#,
            escape_html(slice.name),
            slice.percent
        ));
    }
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::{default_options, PALETTE};

    fn tallies(counts: &[u64]) -> Vec<SurveyOption> {
        let mut options = default_options();
        for (option, &count) in options.iter_mut().zip(counts) {
            option.count = count;
        }
        options
    }

    #[test]
    fn pie_skips_options_without_votes() {
        let options = tallies(&[0, 3, 0, 1]);
        let slices = pie_slices(&options);

        let names: Vec<_> = slices.iter().map(|slice| slice.name).collect();
        assert_eq!(names, ["Pizza", "Tacos"]);
        assert_eq!(slices[0].percent, 75);
        assert_eq!(slices[1].percent, 25);
        assert!((slices[1].end - 1.0).abs() < 1e-9);
    }

    #[test]
    fn pie_colors_follow_filtered_position() {
        let options = tallies(&[0, 3, 0, 1]);
        let slices = pie_slices(&options);
        assert_eq!(slices[0].color, PALETTE[0]);
        assert_eq!(slices[1].color, PALETTE[1]);
    }

    #[test]
    fn pie_percentages_round() {
        let options = tallies(&[1, 1, 1, 0]);
        let percents: Vec<_> = pie_slices(&options).iter().map(|s| s.percent).collect();
        assert_eq!(percents, [33, 33, 33]);

        let options = tallies(&[2, 1, 0, 0]);
        let percents: Vec<_> = pie_slices(&options).iter().map(|s| s.percent).collect();
        assert_eq!(percents, [67, 33]);
    }

    #[test]
    fn pie_is_empty_without_votes() {
        assert!(pie_slices(&default_options()).is_empty());
        assert!(!pie_chart(&default_options()).contains("chart-slice"));
    }

    #[test]
    fn single_slice_renders_as_full_circle() {
        let svg = pie_chart(&tallies(&[4, 0, 0, 0]));
        assert!(svg.contains("<circle class=\"chart-slice\""));
        assert!(svg.contains("Fish: 100%"));
    }

    #[test]
    fn ticks_cover_the_maximum() {
        assert_eq!(axis_ticks(0), [0, 1, 2, 3, 4]);
        assert_eq!(axis_ticks(4), [0, 1, 2, 3, 4]);
        assert_eq!(axis_ticks(10), [0, 3, 6, 9, 12]);
    }

    #[test]
    fn huge_counts_render_without_overflow() {
        let options = tallies(&[u64::MAX, 1, 0, 0]);
        let slices = pie_slices(&options);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].percent, 100);
        assert_eq!(slices[1].percent, 0);

        assert_eq!(*axis_ticks(u64::MAX).last().unwrap(), u64::MAX);
        for svg in [
            bar_chart(&options),
            pie_chart(&options),
            line_chart(&options),
            horizontal_bar_chart(&options),
        ] {
            assert!(svg.ends_with("</svg>"));
        }
    }

    #[test]
    fn horizontal_height_grows_with_options() {
        assert_eq!(horizontal_chart_height(1), 200);
        assert_eq!(horizontal_chart_height(4), 200);
        assert_eq!(horizontal_chart_height(5), 250);
        assert_eq!(horizontal_chart_height(9), 450);
    }

    #[test]
    fn bars_use_positional_colors() {
        let svg = bar_chart(&tallies(&[1, 2, 3, 4]));
        assert_eq!(svg.matches("class=\"chart-bar\"").count(), 4);
        for color in &PALETTE[..4] {
            assert!(svg.contains(color));
        }

        let svg = horizontal_bar_chart(&tallies(&[1, 2, 3, 4]));
        assert_eq!(svg.matches("class=\"chart-bar\"").count(), 4);
        assert!(svg.contains("viewBox=\"0 0 600 200\""));
    }

    #[test]
    fn line_has_a_point_per_option() {
        let svg = line_chart(&tallies(&[1, 2, 3, 4]));
        assert_eq!(svg.matches("class=\"chart-point\"").count(), 4);
        assert!(svg.contains(LINE_STROKE));
    }

    #[test]
    fn names_are_escaped() {
        let mut options = default_options();
        options[0].name = "<b>Fish & Chips</b>".into();
        options[0].count = 1;
        for svg in [
            bar_chart(&options),
            pie_chart(&options),
            line_chart(&options),
            horizontal_bar_chart(&options),
        ] {
            assert!(!svg.contains("<b>"));
            assert!(svg.contains("&lt;b&gt;Fish &amp; Chips&lt;/b&gt;"));
        }
    }
}
