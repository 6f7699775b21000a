//! Lazily built row mapping between view and model coordinates.

/// Cached `view → model` permutation and its inverse.
///
/// Both arrays start absent. The forward array is installed by the owner
/// after sorting; the inverse is derived from it on first use. `clear`
/// drops both.
#[derive(Debug, Default)]
pub(crate) struct RowMapping {
    /// Mapping from view row to model row.
    view_to_model: Option<Vec<usize>>,
    /// Mapping from model row to view row.
    model_to_view: Option<Vec<usize>>,
}

impl RowMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.view_to_model = None;
        self.model_to_view = None;
    }

    pub fn view_to_model(&self) -> Option<&[usize]> {
        self.view_to_model.as_deref()
    }

    pub fn model_to_view(&self) -> Option<&[usize]> {
        self.model_to_view.as_deref()
    }

    #[cfg(test)]
    pub fn has_forward(&self) -> bool {
        self.view_to_model.is_some()
    }

    #[cfg(test)]
    pub fn has_inverse(&self) -> bool {
        self.model_to_view.is_some()
    }

    /// Installs a freshly built forward array, dropping any stale inverse.
    pub fn install(&mut self, view_to_model: Vec<usize>) -> &[usize] {
        self.model_to_view = None;
        self.view_to_model.insert(view_to_model)
    }

    /// Returns the inverse array, deriving it from the forward array if
    /// needed. `None` while the forward array is absent.
    pub fn ensure_inverse(&mut self) -> Option<&[usize]> {
        if self.model_to_view.is_none() {
            let view_to_model = self.view_to_model.as_ref()?;
            let mut model_to_view = vec![0; view_to_model.len()];
            for (view_row, &model_row) in view_to_model.iter().enumerate() {
                model_to_view[model_row] = view_row;
            }
            self.model_to_view = Some(model_to_view);
        }
        self.model_to_view.as_deref()
    }
}
