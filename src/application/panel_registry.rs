// Panel registry - Arena of index-addressed panel slots
use crate::application::renderer::RenderHandle;
use crate::domain::catalog::SeriesSelectors;
use crate::domain::error::DashboardError;
use crate::domain::panel::{DataSourceRef, PanelIndex, PanelKind};
use std::collections::BTreeMap;

/// One on-screen chart slot.
pub struct Panel {
    pub index: PanelIndex,
    pub kind: PanelKind,
    pub data_source: Option<DataSourceRef>,
    /// Catalog name currently drawn
    pub selection: Option<String>,
    pub selectors: SeriesSelectors,
    pub renderer: Option<Box<dyn RenderHandle>>,
}

impl Panel {
    fn new(
        index: PanelIndex,
        kind: PanelKind,
        data_source: Option<DataSourceRef>,
        selectors: SeriesSelectors,
    ) -> Self {
        Self {
            index,
            kind,
            data_source,
            selection: None,
            selectors,
            renderer: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.kind != PanelKind::Empty
    }
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("index", &self.index)
            .field("kind", &self.kind)
            .field("data_source", &self.data_source)
            .field("selection", &self.selection)
            .field("rendered", &self.renderer.is_some())
            .finish()
    }
}

#[derive(Debug)]
enum Slot {
    Open(Panel),
    /// Removed panel; keeps its index out of circulation
    Removed,
}

#[derive(Debug)]
pub struct PanelRegistry {
    slots: BTreeMap<PanelIndex, Slot>,
}

impl PanelRegistry {
    /// Registry holding only the template panel at index 0.
    pub fn new(template_selectors: SeriesSelectors) -> Self {
        let mut slots = BTreeMap::new();
        slots.insert(
            PanelIndex::TEMPLATE,
            Slot::Open(Panel::new(PanelIndex::TEMPLATE, PanelKind::Empty, None, template_selectors)),
        );
        Self { slots }
    }

    /// Allocate `max index + 1`. Tombstones count, so indices are never reused.
    pub fn create_panel(
        &mut self,
        kind: PanelKind,
        data_source: Option<DataSourceRef>,
        selectors: SeriesSelectors,
    ) -> PanelIndex {
        let index = self
            .slots
            .keys()
            .next_back()
            .map(|last| last.next())
            .unwrap_or(PanelIndex(1));
        self.slots
            .insert(index, Slot::Open(Panel::new(index, kind, data_source, selectors)));
        tracing::debug!("Created panel {} ({:?})", index, kind);
        index
    }

    /// Tombstone the slot and release its chart. Absent or already removed
    /// indices are ignored, as is the template panel.
    pub fn remove_panel(&mut self, index: PanelIndex) {
        if index.is_template() {
            tracing::warn!("Ignoring removal of the template panel");
            return;
        }
        match self.slots.get_mut(&index) {
            Some(slot) if matches!(slot, Slot::Open(_)) => {
                // Dropping the panel releases its render handle
                *slot = Slot::Removed;
                tracing::debug!("Removed panel {}", index);
            }
            _ => {
                tracing::debug!("Panel {} already absent, nothing to remove", index);
            }
        }
    }

    /// Panels showing a chart, ascending by index.
    pub fn active_panels(&self) -> impl Iterator<Item = (PanelIndex, &Panel)> {
        self.open_panels().filter(|(_, panel)| panel.is_active())
    }

    pub(crate) fn active_panels_mut(&mut self) -> impl Iterator<Item = (PanelIndex, &mut Panel)> {
        self.slots.iter_mut().filter_map(|(index, slot)| match slot {
            Slot::Open(panel) if panel.is_active() => Some((*index, panel)),
            _ => None,
        })
    }

    /// Every panel not removed, including empty ones.
    pub fn open_panels(&self) -> impl Iterator<Item = (PanelIndex, &Panel)> {
        self.slots.iter().filter_map(|(index, slot)| match slot {
            Slot::Open(panel) => Some((*index, panel)),
            Slot::Removed => None,
        })
    }

    pub fn panel(&self, index: PanelIndex) -> Result<&Panel, DashboardError> {
        match self.slots.get(&index) {
            Some(Slot::Open(panel)) => Ok(panel),
            Some(Slot::Removed) => Err(DashboardError::PanelRemoved(index)),
            None => Err(DashboardError::UnknownPanel(index)),
        }
    }

    pub fn panel_mut(&mut self, index: PanelIndex) -> Result<&mut Panel, DashboardError> {
        match self.slots.get_mut(&index) {
            Some(Slot::Open(panel)) => Ok(panel),
            Some(Slot::Removed) => Err(DashboardError::PanelRemoved(index)),
            None => Err(DashboardError::UnknownPanel(index)),
        }
    }

    pub fn template(&self) -> &Panel {
        match self.slots.get(&PanelIndex::TEMPLATE) {
            Some(Slot::Open(panel)) => panel,
            _ => unreachable!("template panel is never removed"),
        }
    }

    pub fn kind_of(&self, index: PanelIndex) -> Option<PanelKind> {
        self.panel(index).ok().map(|panel| panel.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::renderer::{ChartRenderer, RenderOptions};
    use crate::application::test_support::RecordingRenderer;
    use crate::domain::catalog::SeriesCatalog;

    fn selectors() -> SeriesSelectors {
        SeriesSelectors::new(
            SeriesCatalog::new("Select series", Vec::new()),
            SeriesCatalog::new("Select percentiles", Vec::new()),
        )
    }

    fn source(name: &str) -> Option<DataSourceRef> {
        Some(DataSourceRef::new(format!("resources/{name}.csv")))
    }

    #[test]
    fn test_indices_are_monotonic() {
        let mut registry = PanelRegistry::new(selectors());
        let indices: Vec<PanelIndex> = (0..5)
            .map(|_| registry.create_panel(PanelKind::Empty, None, selectors()))
            .collect();
        assert_eq!(indices, (1..=5).map(PanelIndex).collect::<Vec<_>>());
    }

    #[test]
    fn test_removed_index_is_not_reused() {
        let mut registry = PanelRegistry::new(selectors());
        let first = registry.create_panel(PanelKind::Timeseries, source("a"), selectors());
        let second = registry.create_panel(PanelKind::Timeseries, source("b"), selectors());
        registry.remove_panel(second);

        let third = registry.create_panel(PanelKind::Timeseries, source("c"), selectors());
        assert_eq!(first, PanelIndex(1));
        assert_eq!(third, PanelIndex(3));
        assert_eq!(registry.panel(second).unwrap_err(), DashboardError::PanelRemoved(second));
    }

    #[test]
    fn test_tombstone_isolation() {
        let mut registry = PanelRegistry::new(selectors());
        let a = registry.create_panel(PanelKind::Timeseries, source("a"), selectors());
        let b = registry.create_panel(PanelKind::Cdf, source("b_percentiles"), selectors());
        let c = registry.create_panel(PanelKind::Timeseries, source("c"), selectors());

        registry.remove_panel(b);

        let active: Vec<(PanelIndex, PanelKind, Option<DataSourceRef>)> = registry
            .active_panels()
            .map(|(i, p)| (i, p.kind, p.data_source.clone()))
            .collect();
        assert_eq!(
            active,
            vec![
                (a, PanelKind::Timeseries, source("a")),
                (c, PanelKind::Timeseries, source("c")),
            ]
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut registry = PanelRegistry::new(selectors());
        let a = registry.create_panel(PanelKind::Timeseries, source("a"), selectors());
        registry.remove_panel(a);
        registry.remove_panel(a);
        registry.remove_panel(PanelIndex(42));
        assert_eq!(registry.active_panels().count(), 0);
        assert_eq!(registry.panel(PanelIndex(42)).unwrap_err(), DashboardError::UnknownPanel(PanelIndex(42)));
    }

    #[test]
    fn test_template_survives_removal() {
        let mut registry = PanelRegistry::new(selectors());
        registry.remove_panel(PanelIndex::TEMPLATE);
        assert_eq!(registry.template().index, PanelIndex::TEMPLATE);
        assert_eq!(registry.open_panels().count(), 1);
    }

    #[test]
    fn test_empty_panels_are_not_active() {
        let mut registry = PanelRegistry::new(selectors());
        registry.create_panel(PanelKind::Empty, None, selectors());
        assert_eq!(registry.active_panels().count(), 0);
        assert_eq!(registry.open_panels().count(), 2);
    }

    #[test]
    fn test_remove_releases_renderer() {
        let renderer = RecordingRenderer::default();
        let mut registry = PanelRegistry::new(selectors());
        let a = registry.create_panel(PanelKind::Timeseries, source("a"), selectors());
        let container = a.container();
        registry.panel_mut(a).unwrap().renderer = Some(renderer.render(
            &container,
            &DataSourceRef::new("resources/a.csv"),
            &RenderOptions::timeseries("a", 0, None),
        ));

        registry.remove_panel(a);
        assert_eq!(renderer.log.borrow().released, vec!["charting-div-1".to_string()]);
    }
}
