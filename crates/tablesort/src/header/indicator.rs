//! Sort direction glyphs and the header renderer decorator.

use std::any::Any;
use std::sync::{Arc, Weak};

/// Geometry of the sort glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorStyle {
    /// Size multiplier applied once per priority rank. The primary key's
    /// glyph is full size, the next key's `shrink_factor` times that, and so on.
    pub shrink_factor: f64,
    /// Vertical position of the glyph baseline as a fraction of the cell
    /// size, `(numerator, denominator)`.
    pub baseline_ratio: (i32, i32),
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            shrink_factor: 0.8,
            baseline_ratio: (5, 6),
        }
    }
}

/// The glyph shown next to a sorting column's header label.
///
/// A triangle pointing up for ascending, down for descending. Lower priority
/// keys get smaller triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortIcon {
    ascending: bool,
    size: u32,
    priority: usize,
    style: IndicatorStyle,
}

impl SortIcon {
    /// Creates an icon with the default style.
    pub fn new(ascending: bool, size: u32, priority: usize) -> Self {
        Self::with_style(ascending, size, priority, IndicatorStyle::default())
    }

    /// Creates an icon with a custom style.
    pub fn with_style(ascending: bool, size: u32, priority: usize, style: IndicatorStyle) -> Self {
        Self {
            ascending,
            size,
            priority,
            style,
        }
    }

    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    pub fn priority(&self) -> usize {
        self.priority
    }

    /// Icon width; equal to the requested size.
    pub fn width(&self) -> u32 {
        self.size
    }

    /// Icon height; equal to the requested size.
    pub fn height(&self) -> u32 {
        self.size
    }

    /// Returns the triangle's corners for an icon placed at `(x, y)`.
    ///
    /// Coordinates grow downward. The first point is the apex; the other two
    /// form the base.
    pub fn triangle(&self, x: i32, y: i32) -> [(i32, i32); 3] {
        let size = i32::try_from(self.size).unwrap_or(i32::MAX);
        let priority = i32::try_from(self.priority).unwrap_or(i32::MAX);
        let scale = self.style.shrink_factor.powi(priority);
        // Float to int casts saturate.
        let mut dx = (f64::from(size / 2) * scale) as i32;
        // Ascending glyphs are one pixel larger.
        if self.ascending {
            dx = dx.saturating_add(1);
        }
        let dy = if self.ascending { dx } else { -dx };

        let (numerator, denominator) = self.style.baseline_ratio;
        let baseline = i64::from(numerator) * i64::from(size) / i64::from(denominator.max(1));
        let baseline = baseline.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        let y = y
            .saturating_add(baseline)
            .saturating_sub(if self.ascending { dy } else { 0 });

        [
            (x, y),
            (x.saturating_add(dx / 2), y.saturating_add(dy)),
            (x.saturating_sub(dx / 2), y.saturating_add(dy)),
        ]
    }
}

/// The rendered content of one header cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub text: String,
    pub font_size: u32,
    pub icon: Option<SortIcon>,
    /// Place the text before the icon.
    pub text_before_icon: bool,
}

/// Produces the content of header cells.
pub trait HeaderRenderer: Send + Sync {
    /// Renders the header for a model column.
    fn render(&self, column: usize, label: &str) -> HeaderCell;

    /// Returns this renderer as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// A renderer that shows the label text only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultHeaderRenderer {
    pub font_size: u32,
}

impl Default for DefaultHeaderRenderer {
    fn default() -> Self {
        Self { font_size: 12 }
    }
}

impl HeaderRenderer for DefaultHeaderRenderer {
    fn render(&self, _column: usize, label: &str) -> HeaderCell {
        HeaderCell {
            text: label.to_string(),
            font_size: self.font_size,
            icon: None,
            text_before_icon: false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Supplies the sort glyph for a column.
pub trait SortIndicatorProvider: Send + Sync {
    /// Returns the glyph for `column` at the given size, or `None` if the
    /// column is not sorting.
    fn sort_icon(&self, column: usize, size: u32) -> Option<SortIcon>;
}

/// Wraps a header renderer and adds the sort glyph.
///
/// Holds the provider weakly; once it is gone the wrapper renders exactly
/// like the inner renderer, apart from text placement.
pub struct SortableHeaderRenderer {
    inner: Arc<dyn HeaderRenderer>,
    provider: Weak<dyn SortIndicatorProvider>,
}

impl SortableHeaderRenderer {
    /// Wraps `inner`, taking glyphs from `provider`.
    pub fn new(inner: Arc<dyn HeaderRenderer>, provider: Weak<dyn SortIndicatorProvider>) -> Self {
        Self { inner, provider }
    }

    /// Returns the wrapped renderer.
    pub fn inner(&self) -> &Arc<dyn HeaderRenderer> {
        &self.inner
    }
}

impl HeaderRenderer for SortableHeaderRenderer {
    fn render(&self, column: usize, label: &str) -> HeaderCell {
        let mut cell = self.inner.render(column, label);
        cell.text_before_icon = true;
        cell.icon = self
            .provider
            .upgrade()
            .and_then(|provider| provider.sort_icon(column, cell.font_size));
        cell
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

static_assertions::assert_impl_all!(SortableHeaderRenderer: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider(Option<SortIcon>);

    impl SortIndicatorProvider for FixedProvider {
        fn sort_icon(&self, _column: usize, size: u32) -> Option<SortIcon> {
            self.0
                .map(|icon| SortIcon::new(icon.is_ascending(), size, icon.priority()))
        }
    }

    #[test]
    fn test_primary_descending_triangle() {
        let icon = SortIcon::new(false, 12, 0);
        // dx = 6, dy = -6, baseline = 10.
        assert_eq!(icon.triangle(0, 0), [(0, 10), (3, 4), (-3, 4)]);
        assert_eq!(icon.width(), 12);
        assert_eq!(icon.height(), 12);
    }

    #[test]
    fn test_primary_ascending_triangle() {
        let icon = SortIcon::new(true, 12, 0);
        // dx = 7, dy = 7, apex lifted by 7 from baseline 10.
        assert_eq!(icon.triangle(0, 0), [(0, 3), (3, 10), (-3, 10)]);
    }

    #[test]
    fn test_lower_priority_shrinks() {
        // 6 * 0.8 = 4.8 -> 4; 6 * 0.64 = 3.84 -> 3.
        let second = SortIcon::new(false, 12, 1);
        assert_eq!(second.triangle(0, 0), [(0, 10), (2, 6), (-2, 6)]);
        let third = SortIcon::new(false, 12, 2);
        assert_eq!(third.triangle(0, 0), [(0, 10), (1, 7), (-1, 7)]);
    }

    #[test]
    fn test_huge_icon_saturates() {
        let icon = SortIcon::new(true, u32::MAX, 0);
        let [apex, right, left] = icon.triangle(0, 0);
        assert!(apex.1 <= right.1);
        assert_eq!(right.1, left.1);
        assert!(right.0 > 0 && left.0 < 0);

        let icon = SortIcon::new(false, 3_000_000_000, 0);
        let [apex, right, _] = icon.triangle(i32::MAX - 10, 0);
        assert!(apex.1 >= right.1);
        assert_eq!(right.0, i32::MAX);
    }

    #[test]
    fn test_offset_is_applied() {
        let icon = SortIcon::new(false, 12, 0);
        assert_eq!(icon.triangle(20, 5), [(20, 15), (23, 9), (17, 9)]);
    }

    #[test]
    fn test_sortable_renderer_adds_icon() {
        let provider: Arc<dyn SortIndicatorProvider> =
            Arc::new(FixedProvider(Some(SortIcon::new(true, 0, 1))));
        let renderer = SortableHeaderRenderer::new(
            Arc::new(DefaultHeaderRenderer::default()),
            Arc::downgrade(&provider),
        );

        let cell = renderer.render(0, "Name");
        assert_eq!(cell.text, "Name");
        assert!(cell.text_before_icon);
        assert_eq!(cell.icon, Some(SortIcon::new(true, 12, 1)));
    }

    #[test]
    fn test_sortable_renderer_without_provider() {
        let provider: Arc<dyn SortIndicatorProvider> = Arc::new(FixedProvider(None));
        let renderer = SortableHeaderRenderer::new(
            Arc::new(DefaultHeaderRenderer::default()),
            Arc::downgrade(&provider),
        );
        assert_eq!(renderer.render(0, "A").icon, None);

        drop(provider);
        assert_eq!(renderer.render(0, "A").icon, None);
    }

    #[test]
    fn test_unwrap_by_downcast() {
        let provider: Arc<dyn SortIndicatorProvider> = Arc::new(FixedProvider(None));
        let renderer: Arc<dyn HeaderRenderer> = Arc::new(SortableHeaderRenderer::new(
            Arc::new(DefaultHeaderRenderer { font_size: 9 }),
            Arc::downgrade(&provider),
        ));

        let sortable = renderer
            .as_any()
            .downcast_ref::<SortableHeaderRenderer>()
            .expect("sortable renderer");
        let inner = sortable.inner().as_any().downcast_ref::<DefaultHeaderRenderer>();
        assert_eq!(inner, Some(&DefaultHeaderRenderer { font_size: 9 }));
    }
}
