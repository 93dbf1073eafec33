//! ffmpeg filtergraph for the four-pane match view
//!
//! ```text
//! [0:v] scale → subtitles → drawtext #n → drawtext name ─┐ vstack → pad blue → label ─┐
//! [1:v] ...                                              ─┘                          ├ hstack [v]
//! [2:v] ...                                              ─┐ vstack → pad red  → label ─┘
//! [3:v] ...                                              ─┘
//! [0:a][1:a][2:a][3:a] amerge [a]
//! ```

use std::path::Path;

use crate::manifest::Alliance;

/// Margin between a label and the pane edge, in pixels
const LABEL_MARGIN: u32 = 20;
/// Vertical position of the team number and team name labels
const NUMBER_Y: u32 = 10;
const NAME_Y: u32 = 40;
/// Border drawn around each alliance pane
const PANE_BORDER: u32 = 5;

/// Visual parameters of the composed view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterStyle {
    pub width: u32,
    pub height: u32,
    pub caption_font_size: u32,
    pub label_font_size: u32,
    pub alliance_font_size: u32,
}

impl Default for FilterStyle {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            caption_font_size: 16,
            label_font_size: 18,
            alliance_font_size: 24,
        }
    }
}

/// What the filtergraph needs to know about one input stream
#[derive(Debug, Clone, Copy)]
pub struct StreamLabels<'a> {
    pub team_number: &'a str,
    pub team_name: &'a str,
    pub alliance: Alliance,
    pub caption: &'a Path,
}

/// Escape text for use inside a single-quoted filter option.
///
/// A quote cannot be escaped inside quotes, so it closes the quoted run,
/// adds an escaped quote and reopens it.
pub fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(':', "\\:")
        .replace('\'', "'\\''")
}

/// Horizontal anchor for team labels: Blue hugs the left edge, Red the right.
fn team_label_x(alliance: Alliance) -> String {
    match alliance {
        Alliance::Blue => LABEL_MARGIN.to_string(),
        Alliance::Red => format!("(w-text_w)-{LABEL_MARGIN}"),
    }
}

/// Horizontal anchor for the alliance label, towards the centre seam.
fn alliance_label_x(alliance: Alliance) -> String {
    match alliance {
        Alliance::Blue => format!("(w-text_w)-{LABEL_MARGIN}"),
        Alliance::Red => LABEL_MARGIN.to_string(),
    }
}

fn drawtext(text: &str, color: &str, size: u32, box_color: &str, x: &str, y: &str) -> String {
    format!(
        "drawtext=text='{}':fontcolor={color}:fontsize={size}:box=1:\
         boxcolor={box_color}:boxborderw={PANE_BORDER}:x={x}:y={y}",
        escape(text)
    )
}

/// Build the filtergraph for streams ordered Blue, Blue, Red, Red.
///
/// Produces the video pad `[v]` and the audio pad `[a]`.
pub fn build_filter_graph(streams: &[StreamLabels<'_>], style: &FilterStyle) -> String {
    let mut chains = Vec::with_capacity(streams.len() * 4 + 9);

    for (i, stream) in streams.iter().enumerate() {
        let x = team_label_x(stream.alliance);
        chains.push(format!(
            "[{i}:v]scale={}:{}[v{i}n]",
            style.width, style.height
        ));
        chains.push(format!(
            "[v{i}n]subtitles=filename='{}':force_style='Fontsize={}'[v{i}s]",
            escape(&stream.caption.to_string_lossy()),
            style.caption_font_size
        ));
        chains.push(format!(
            "[v{i}s]{}[v{i}t]",
            drawtext(
                &format!("FTC #{}", stream.team_number),
                "white",
                style.label_font_size,
                "black@0.5",
                &x,
                &NUMBER_Y.to_string()
            )
        ));
        chains.push(format!(
            "[v{i}t]{}[v{i}]",
            drawtext(
                stream.team_name,
                "white",
                style.label_font_size,
                "black@0.5",
                &x,
                &NAME_Y.to_string()
            )
        ));
    }

    for (pane, alliance, first) in [("left", Alliance::Blue, 0), ("right", Alliance::Red, 2)] {
        let second = first + 1;
        chains.push(format!("[v{first}][v{second}]vstack[{pane}s]"));
        chains.push(format!(
            "[{pane}s]pad=iw+{border}:ih+{border}:{PANE_BORDER}:{PANE_BORDER}:color={color}[{pane}p]",
            border = PANE_BORDER * 2,
            color = alliance.color()
        ));
        chains.push(format!(
            "[{pane}p]{}[{pane}]",
            drawtext(
                alliance.label(),
                alliance.color(),
                style.alliance_font_size,
                "orange@0.9",
                &alliance_label_x(alliance),
                "h/2-10"
            )
        ));
    }
    chains.push("[left][right]hstack[v]".to_string());

    let audio: String = (0..streams.len()).map(|i| format!("[{i}:a]")).collect();
    chains.push(format!("{audio}amerge=inputs={}[a]", streams.len()));

    chains.join("; ")
}
