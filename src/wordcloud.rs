//! Word cloud layout and SVG rendering.
//!
//! Words are sized linearly by frequency and placed along an Archimedean
//! spiral from the canvas centre. A word that can't be placed without
//! overlapping is shrunk, then dropped.

use crate::analytics::{self, WordCount};
use quick_xml::escape::escape;
use std::f32::consts::PI;

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 400;
pub const BACKGROUND: &str = "white";

const PALETTE: [&str; 6] = [
    "#440154", "#3b528b", "#21918c", "#5ec962", "#e08c00", "#b5367a",
];

/// Rough advance width of a glyph relative to font size
const GLYPH_WIDTH: f32 = 0.6;
const SPIRAL_STEP: f32 = 0.1;
const MAX_SPIRAL_STEPS: usize = 4000;
const SHRINK: f32 = 0.8;

#[derive(Debug, Clone)]
pub struct WordCloudOptions {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
    pub min_font_size: f32,
    pub max_font_size: f32,
}

impl Default for WordCloudOptions {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            max_words: 200,
            min_font_size: 10.0,
            max_font_size: 80.0,
        }
    }
}

/// A word positioned on the canvas. `x`/`y` is the top-left of its box.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub count: usize,
    pub font_size: f32,
    pub x: f32,
    pub y: f32,
}

impl PlacedWord {
    fn width(&self) -> f32 {
        text_width(&self.word, self.font_size)
    }

    fn overlaps(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        x < self.x + self.width() && self.x < x + w && y < self.y + self.font_size && self.y < y + h
    }
}

#[derive(Debug, Clone)]
pub struct WordCloud {
    pub width: u32,
    pub height: u32,
    pub words: Vec<PlacedWord>,
}

fn text_width(word: &str, font_size: f32) -> f32 {
    word.chars().count() as f32 * font_size * GLYPH_WIDTH
}

impl WordCloud {
    /// Build a cloud from the qualifying words of `text`
    pub fn from_text(text: &str, options: &WordCloudOptions) -> Self {
        Self::layout(&analytics::word_frequencies(text), options)
    }

    /// Lay out `frequencies`, which must be sorted most frequent first
    pub fn layout(frequencies: &[WordCount], options: &WordCloudOptions) -> Self {
        let mut words: Vec<PlacedWord> = Vec::new();
        let max_count = frequencies.first().map(|w| w.count).unwrap_or(0);

        for entry in frequencies.iter().take(options.max_words) {
            let mut font_size = scale(entry.count, max_count, options);

            while font_size >= options.min_font_size {
                if let Some((x, y)) = find_position(&entry.word, font_size, &words, options) {
                    words.push(PlacedWord {
                        word: entry.word.clone(),
                        count: entry.count,
                        font_size,
                        x,
                        y,
                    });
                    break;
                }
                font_size *= SHRINK;
            }
        }

        tracing::debug!(
            placed = words.len(),
            candidates = frequencies.len().min(options.max_words),
            "laid out word cloud"
        );

        Self {
            width: options.width,
            height: options.height,
            words,
        }
    }

    /// Render as a standalone SVG document
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        svg.push('\n');
        svg.push_str(&format!(
            "  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
            BACKGROUND
        ));

        for (i, word) in self.words.iter().enumerate() {
            svg.push_str(&format!(
                "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"{:.1}\" font-family=\"sans-serif\" fill=\"{}\">{}</text>\n",
                word.x,
                word.y + word.font_size * 0.8,
                word.font_size,
                PALETTE[i % PALETTE.len()],
                escape(word.word.as_str())
            ));
        }

        svg.push_str("</svg>\n");
        svg
    }
}

/// Font size proportional to `count / max_count`
fn scale(count: usize, max_count: usize, options: &WordCloudOptions) -> f32 {
    if max_count == 0 {
        return options.min_font_size;
    }
    let ratio = count as f32 / max_count as f32;
    options.min_font_size + (options.max_font_size - options.min_font_size) * ratio
}

fn find_position(
    word: &str,
    font_size: f32,
    placed: &[PlacedWord],
    options: &WordCloudOptions,
) -> Option<(f32, f32)> {
    let (width, height) = (options.width as f32, options.height as f32);
    let (w, h) = (text_width(word, font_size), font_size);
    if w > width || h > height {
        return None;
    }

    let aspect = width / height;
    let (cx, cy) = (width / 2.0, height / 2.0);

    for step in 0..MAX_SPIRAL_STEPS {
        let t = step as f32 * SPIRAL_STEP;
        let radius = 2.0 * t;
        let x = cx + radius * aspect * (t * PI / 8.0).cos() - w / 2.0;
        let y = cy + radius * (t * PI / 8.0).sin() - h / 2.0;

        if x < 0.0 || y < 0.0 || x + w > width || y + h > height {
            continue;
        }
        if placed.iter().all(|p| !p.overlaps(x, y, w, h)) {
            return Some((x, y));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes_follow_frequency() {
        let cloud = WordCloud::from_text(
            "gato gato gato comeu comeu correu",
            &WordCloudOptions::default(),
        );

        let size = |w: &str| {
            cloud
                .words
                .iter()
                .find(|p| p.word == w)
                .map(|p| p.font_size)
                .unwrap()
        };
        assert_eq!(cloud.words.len(), 3);
        assert!(size("gato") > size("comeu"));
        assert!(size("comeu") > size("correu"));
    }

    #[test]
    fn test_words_stay_on_canvas_without_overlap() {
        let frequencies: Vec<WordCount> = ["rust", "cargo", "tokio", "serde", "clap", "tracing"]
            .iter()
            .enumerate()
            .map(|(i, w)| WordCount::new(*w, 10 - i))
            .collect();
        let cloud = WordCloud::layout(&frequencies, &WordCloudOptions::default());

        for (i, a) in cloud.words.iter().enumerate() {
            assert!(a.x >= 0.0 && a.y >= 0.0);
            assert!(a.x + a.width() <= CANVAS_WIDTH as f32);
            assert!(a.y + a.font_size <= CANVAS_HEIGHT as f32);
            for b in &cloud.words[i + 1..] {
                assert!(!a.overlaps(b.x, b.y, b.width(), b.font_size));
            }
        }
    }

    #[test]
    fn test_max_words() {
        let frequencies: Vec<WordCount> = (0..50)
            .map(|i| WordCount::new(format!("w{}", i), 1))
            .collect();
        let options = WordCloudOptions {
            max_words: 5,
            ..Default::default()
        };
        let cloud = WordCloud::layout(&frequencies, &options);
        assert!(cloud.words.len() <= 5);
    }

    #[test]
    fn test_svg_canvas() {
        let cloud = WordCloud::from_text("gato", &WordCloudOptions::default());
        let svg = cloud.to_svg();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="800" height="400""#));
        assert!(svg.contains(r#"fill="white""#));
        assert!(svg.contains(">gato</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_empty_cloud() {
        let cloud = WordCloud::from_text("", &WordCloudOptions::default());
        assert!(cloud.words.is_empty());
        assert!(!cloud.to_svg().contains("<text"));
    }

    #[test]
    fn test_markup_in_words_is_escaped() {
        let cloud = WordCloud::layout(&[WordCount::new("a<b&c", 1)], &WordCloudOptions::default());
        let svg = cloud.to_svg();

        assert!(svg.contains(">a&lt;b&amp;c</text>"));
        assert!(!svg.contains("a<b"));
    }
}
