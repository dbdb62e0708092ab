// Recording chart widget for unit tests
use crate::application::renderer::{ChartRenderer, RangeNotifier, RenderHandle, RenderOptions};
use crate::domain::panel::{ContainerId, DataSourceRef};
use crate::domain::range::TimeRange;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub container: String,
    pub source: DataSourceRef,
    pub options: RenderOptions,
}

#[derive(Debug, Default)]
pub struct RenderLog {
    pub draws: Vec<DrawCall>,
    /// (container, range) for every `impose_range`
    pub imposed: Vec<(String, TimeRange)>,
    pub resizes: Vec<(String, u32, u32)>,
    pub released: Vec<String>,
    notifiers: HashMap<String, RangeNotifier>,
}

/// Widget double. When `echo` is set, every imposed range is reported back
/// through the notifier before `impose_range` returns, as real widgets do.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub log: Rc<RefCell<RenderLog>>,
    pub echo: bool,
}

impl RecordingRenderer {
    pub fn echoing() -> Self {
        Self {
            log: Rc::default(),
            echo: true,
        }
    }

    /// Simulate the user panning or zooming the chart in `container`.
    pub fn pan(&self, container: &str, range: TimeRange) {
        let notifier = self.log.borrow().notifiers.get(container).cloned();
        notifier
            .unwrap_or_else(|| panic!("no range subscription for {container}"))
            .notify(range);
    }

    pub fn imposed_on(&self, container: &str) -> Vec<TimeRange> {
        self.log
            .borrow()
            .imposed
            .iter()
            .filter(|(c, _)| c == container)
            .map(|(_, r)| *r)
            .collect()
    }

    pub fn imposed_count(&self) -> usize {
        self.log.borrow().imposed.len()
    }

    pub fn last_draw(&self) -> DrawCall {
        self.log.borrow().draws.last().cloned().expect("nothing drawn")
    }
}

impl ChartRenderer for RecordingRenderer {
    fn render(
        &self,
        container: &ContainerId,
        source: &DataSourceRef,
        options: &RenderOptions,
    ) -> Box<dyn RenderHandle> {
        self.log.borrow_mut().draws.push(DrawCall {
            container: container.as_str().to_string(),
            source: source.clone(),
            options: options.clone(),
        });
        Box::new(RecordingHandle {
            container: container.as_str().to_string(),
            range: options.date_window,
            notifier: None,
            log: self.log.clone(),
            echo: self.echo,
        })
    }
}

pub struct RecordingHandle {
    container: String,
    range: Option<TimeRange>,
    notifier: Option<RangeNotifier>,
    log: Rc<RefCell<RenderLog>>,
    echo: bool,
}

impl RenderHandle for RecordingHandle {
    fn current_range(&self) -> Option<TimeRange> {
        self.range
    }

    fn impose_range(&mut self, range: TimeRange) {
        self.range = Some(range);
        self.log
            .borrow_mut()
            .imposed
            .push((self.container.clone(), range));
        if self.echo {
            if let Some(notifier) = &self.notifier {
                notifier.notify(range);
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.log
            .borrow_mut()
            .resizes
            .push((self.container.clone(), width, height));
    }

    fn on_range_changed(&mut self, notifier: RangeNotifier) {
        self.log
            .borrow_mut()
            .notifiers
            .insert(self.container.clone(), notifier.clone());
        self.notifier = Some(notifier);
    }
}

impl Drop for RecordingHandle {
    fn drop(&mut self) {
        let mut log = self.log.borrow_mut();
        log.notifiers.remove(&self.container);
        log.released.push(self.container.clone());
    }
}
