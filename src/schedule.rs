// Logical timers driven by frame time.

/// Handle for cancelling a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<E> {
    id: TimerId,
    due: f64,
    /// Repeat period and remaining repeats after this firing.
    repeat: Option<(f32, u32)>,
    event: E,
}

/// Fires events in due order; timers registered earlier win ties.
///
/// Events scheduled while handling the output of [`Timeline::advance`] fire no
/// earlier than the next call, even with a zero delay.
#[derive(Debug)]
pub struct Timeline<E> {
    now: f64,
    next_id: u64,
    entries: Vec<Entry<E>>,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<E: Clone> Timeline<E> {
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fires `event` once, `delay` seconds from now.
    pub fn after(&mut self, delay: f32, event: E) -> TimerId {
        self.push(delay, None, event)
    }

    /// Fires `event` every `period` seconds, `times` times in total.
    pub fn every(&mut self, period: f32, times: u32, event: E) -> Option<TimerId> {
        if times == 0 {
            return None;
        }
        Some(self.push(period, Some((period, times - 1)), event))
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Moves time forward and returns every event that came due, in order.
    /// A repeating timer can fire several times within one call.
    pub fn advance(&mut self, dt: f32) -> Vec<E> {
        self.now += f64::from(dt.max(0.0));
        let mut fired = Vec::new();
        while let Some(index) = self.next_due() {
            fired.push(self.entries[index].event.clone());
            match self.entries[index].repeat {
                Some((period, remaining)) if remaining > 0 => {
                    let entry = &mut self.entries[index];
                    entry.due += f64::from(period.max(f32::EPSILON));
                    entry.repeat = Some((period, remaining - 1));
                }
                _ => {
                    self.entries.remove(index);
                }
            }
        }
        fired
    }

    fn push(&mut self, delay: f32, repeat: Option<(f32, u32)>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: self.now + f64::from(delay.max(0.0)),
            repeat,
            event,
        });
        id
    }

    fn next_due(&self) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= self.now)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.0.cmp(&b.id.0)))
            .map(|(index, _)| index)
    }
}
