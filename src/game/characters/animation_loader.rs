// Fires a character's sequence loads and turns completions into events

use crate::engine::assets::{LoadCallback, SequenceLoader};
use crossbeam_channel::Sender;
use log::debug;

use super::animation::{AnimationTable, SlotLoadContext};
use super::profile::CharacterProfile;

/// Outcome of one sequence request, delivered to the owning player
#[derive(Debug)]
pub enum LoadEvent {
    Loaded {
        context: SlotLoadContext,
        frame_count: usize,
    },
    Failed {
        context: SlotLoadContext,
        url: String,
        error: String,
    },
}

impl LoadEvent {
    pub fn context(&self) -> SlotLoadContext {
        match self {
            Self::Loaded { context, .. } | Self::Failed { context, .. } => *context,
        }
    }
}

/// Populates a character's animation table and starts loading every slot
#[derive(Debug, Clone, Copy)]
pub struct CharacterAnimationLoader {
    profile: &'static CharacterProfile,
}

impl CharacterAnimationLoader {
    pub fn new(profile: &'static CharacterProfile) -> Self {
        Self { profile }
    }

    /// Insert an unloaded entry for each slot and request its sequence.
    ///
    /// Slots already present in `table` are left alone and not requested
    /// again.
    ///
    /// Completions arrive on `completions` in whatever order the loader
    /// finishes them. Returns the number of requests issued.
    pub fn init<L: SequenceLoader + ?Sized>(
        &self,
        table: &mut AnimationTable,
        loader: &L,
        completions: &Sender<LoadEvent>,
    ) -> usize {
        let mut requested = 0;

        for slot in 0..self.profile.slot_count() {
            if table.get(slot).is_some() {
                continue;
            }
            let Some(initial) = self.profile.initial_slot(slot) else {
                continue;
            };
            table.set(slot, initial);

            let url = self.profile.sequence_url(slot);
            let context = self.profile.load_context(slot);
            debug!("{}: slot {} <- {}", self.profile.name, slot, url);

            loader.request(&url, completion_handler(context, url.clone(), completions.clone()));
            requested += 1;
        }

        requested
    }
}

fn completion_handler(
    context: SlotLoadContext,
    url: String,
    completions: Sender<LoadEvent>,
) -> LoadCallback {
    Box::new(move |result| {
        let event = match result {
            Ok(frame_count) => LoadEvent::Loaded {
                context,
                frame_count,
            },
            Err(error) => LoadEvent::Failed {
                context,
                url,
                error: format!("{:#}", error),
            },
        };
        // A closed channel means the player is gone and nobody cares anymore.
        let _ = completions.send(event);
    })
}

/// Loader that parks every request until a test completes it by hand
#[cfg(test)]
#[derive(Default)]
pub(crate) struct ManualLoader {
    requests: std::cell::RefCell<Vec<(String, Option<LoadCallback>)>>,
}

#[cfg(test)]
impl ManualLoader {
    pub(crate) fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|(u, _)| u.clone()).collect()
    }

    /// Fire the pending callback for `url`; false if there is none left
    pub(crate) fn finish(&self, url: &str, result: anyhow::Result<usize>) -> bool {
        let callback = self
            .requests
            .borrow_mut()
            .iter_mut()
            .find(|(u, cb)| u == url && cb.is_some())
            .and_then(|(_, cb)| cb.take());

        match callback {
            Some(callback) => {
                callback(result);
                true
            }
            None => false,
        }
    }

    pub(crate) fn complete(&self, url: &str, frame_count: usize) -> bool {
        self.finish(url, Ok(frame_count))
    }
}

#[cfg(test)]
impl SequenceLoader for ManualLoader {
    fn request(&self, url: &str, on_load: LoadCallback) {
        self.requests
            .borrow_mut()
            .push((url.to_string(), Some(on_load)));
    }
}
