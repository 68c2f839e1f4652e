//! Homepage slider lineup.
//!
//! The lineup is a single aggregate holding every slide so that the slot
//! rules (at most [`MAX_SLIDES`], never fewer than [`MIN_SLIDES`] once
//! populated, unique order indices) are checked in one place.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{Aggregate, AggregateId, AggregateRoot, DomainError, Entity, Event};

pub const MAX_SLIDES: usize = 5;
pub const MIN_SLIDES: usize = 1;
pub const DEFAULT_SLIDE_TITLE: &str = "No Title";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideId(pub AggregateId);

impl SlideId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(AggregateId::new())
    }
}

impl core::fmt::Display for SlideId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// There is exactly one lineup today: the homepage carousel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineupId {
    #[default]
    Homepage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub id: SlideId,
    pub image_url: String,
    pub title: String,
    /// Slot index, `0..MAX_SLIDES`.
    pub order: usize,
    pub created_at: DateTime<Utc>,
}

impl Entity for Slide {
    type Id = SlideId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Aggregate root: SliderLineup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SliderLineup {
    id: LineupId,
    slides: Vec<Slide>,
    version: u64,
}

impl SliderLineup {
    pub fn empty(id: LineupId) -> Self {
        Self {
            id,
            slides: Vec::new(),
            version: 0,
        }
    }

    /// Slides sorted by slot.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide(&self, id: SlideId) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slides.len() >= MAX_SLIDES
    }

    /// Free slots, plus `editing` (the slot of the slide being edited) if given.
    pub fn available_slots(&self, editing: Option<usize>) -> Vec<usize> {
        let used: HashSet<usize> = self.slides.iter().map(|s| s.order).collect();
        (0..MAX_SLIDES)
            .filter(|slot| !used.contains(slot) || Some(*slot) == editing)
            .collect()
    }

    fn sort(&mut self) {
        self.slides.sort_by_key(|s| (s.order, s.created_at));
    }

    fn renumber(&mut self) {
        for (index, slide) in self.slides.iter_mut().enumerate() {
            slide.order = index;
        }
    }
}

impl AggregateRoot for SliderLineup {
    type Id = LineupId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddSlide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSlide {
    pub slide_id: SlideId,
    pub image_url: String,
    pub title: Option<String>,
    /// Explicit slot; the lowest free slot when absent.
    pub order: Option<usize>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateSlide. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSlide {
    pub slide_id: SlideId,
    pub image_url: Option<String>,
    pub title: Option<String>,
    pub order: Option<usize>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveSlide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveSlide {
    pub slide_id: SlideId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReorderSlides. `ordered` must list every current slide exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderSlides {
    pub ordered: Vec<SlideId>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliderCommand {
    AddSlide(AddSlide),
    UpdateSlide(UpdateSlide),
    RemoveSlide(RemoveSlide),
    ReorderSlides(ReorderSlides),
}

/// Event: SlideAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideAdded {
    pub slide: Slide,
}

/// Event: SlideUpdated (resolved values, not the patch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideUpdated {
    pub slide_id: SlideId,
    pub image_url: String,
    pub title: String,
    pub order: usize,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SlideRemoved. Remaining slides are renumbered `0..N-1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideRemoved {
    pub slide_id: SlideId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SlidesReordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlidesReordered {
    pub ordered: Vec<SlideId>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliderEvent {
    SlideAdded(SlideAdded),
    SlideUpdated(SlideUpdated),
    SlideRemoved(SlideRemoved),
    SlidesReordered(SlidesReordered),
}

impl Event for SliderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SliderEvent::SlideAdded(_) => "catalog.slider.slide_added",
            SliderEvent::SlideUpdated(_) => "catalog.slider.slide_updated",
            SliderEvent::SlideRemoved(_) => "catalog.slider.slide_removed",
            SliderEvent::SlidesReordered(_) => "catalog.slider.reordered",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SliderEvent::SlideAdded(e) => e.slide.created_at,
            SliderEvent::SlideUpdated(e) => e.occurred_at,
            SliderEvent::SlideRemoved(e) => e.occurred_at,
            SliderEvent::SlidesReordered(e) => e.occurred_at,
        }
    }
}

impl Aggregate for SliderLineup {
    type Command = SliderCommand;
    type Event = SliderEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            SliderEvent::SlideAdded(e) => {
                self.slides.push(e.slide.clone());
                self.sort();
            }
            SliderEvent::SlideUpdated(e) => {
                if let Some(slide) = self.slides.iter_mut().find(|s| s.id == e.slide_id) {
                    slide.image_url = e.image_url.clone();
                    slide.title = e.title.clone();
                    slide.order = e.order;
                }
                self.sort();
            }
            SliderEvent::SlideRemoved(e) => {
                self.slides.retain(|s| s.id != e.slide_id);
                self.renumber();
            }
            SliderEvent::SlidesReordered(e) => {
                self.slides.sort_by_key(|s| {
                    e.ordered
                        .iter()
                        .position(|id| *id == s.id)
                        .unwrap_or(usize::MAX)
                });
                self.renumber();
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            SliderCommand::AddSlide(cmd) => self.handle_add(cmd),
            SliderCommand::UpdateSlide(cmd) => self.handle_update(cmd),
            SliderCommand::RemoveSlide(cmd) => self.handle_remove(cmd),
            SliderCommand::ReorderSlides(cmd) => self.handle_reorder(cmd),
        }
    }
}

impl SliderLineup {
    fn existing(&self, slide_id: SlideId) -> Result<&Slide, DomainError> {
        self.slide(slide_id).ok_or_else(DomainError::not_found)
    }

    fn ensure_slot(&self, order: usize, editing: Option<usize>) -> Result<(), DomainError> {
        if !self.available_slots(editing).contains(&order) {
            return Err(DomainError::validation(format!(
                "slot {order} is not available"
            )));
        }
        Ok(())
    }

    fn handle_add(&self, cmd: &AddSlide) -> Result<Vec<SliderEvent>, DomainError> {
        if self.is_full() {
            return Err(DomainError::invariant(format!(
                "maximum {MAX_SLIDES} sliders allowed"
            )));
        }
        if self.slide(cmd.slide_id).is_some() {
            return Err(DomainError::conflict("slide already exists"));
        }
        if cmd.image_url.trim().is_empty() {
            return Err(DomainError::validation("image_url cannot be empty"));
        }

        let order = match cmd.order {
            Some(order) => {
                self.ensure_slot(order, None)?;
                order
            }
            None => self
                .available_slots(None)
                .first()
                .copied()
                .ok_or_else(|| DomainError::invariant("no free slot"))?,
        };

        let title = cmd
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_SLIDE_TITLE)
            .to_string();

        Ok(vec![SliderEvent::SlideAdded(SlideAdded {
            slide: Slide {
                id: cmd.slide_id,
                image_url: cmd.image_url.clone(),
                title,
                order,
                created_at: cmd.occurred_at,
            },
        })])
    }

    fn handle_update(&self, cmd: &UpdateSlide) -> Result<Vec<SliderEvent>, DomainError> {
        let current = self.existing(cmd.slide_id)?;

        let image_url = match &cmd.image_url {
            Some(url) if url.trim().is_empty() => {
                return Err(DomainError::validation("image_url cannot be empty"));
            }
            Some(url) => url.clone(),
            None => current.image_url.clone(),
        };
        let title = match cmd.title.as_deref().map(str::trim) {
            Some("") => DEFAULT_SLIDE_TITLE.to_string(),
            Some(t) => t.to_string(),
            None => current.title.clone(),
        };
        let order = match cmd.order {
            Some(order) => {
                self.ensure_slot(order, Some(current.order))?;
                order
            }
            None => current.order,
        };

        Ok(vec![SliderEvent::SlideUpdated(SlideUpdated {
            slide_id: cmd.slide_id,
            image_url,
            title,
            order,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveSlide) -> Result<Vec<SliderEvent>, DomainError> {
        self.existing(cmd.slide_id)?;
        if self.slides.len() <= MIN_SLIDES {
            return Err(DomainError::invariant(format!(
                "minimum {MIN_SLIDES} slider required"
            )));
        }

        Ok(vec![SliderEvent::SlideRemoved(SlideRemoved {
            slide_id: cmd.slide_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_reorder(&self, cmd: &ReorderSlides) -> Result<Vec<SliderEvent>, DomainError> {
        let requested: HashSet<SlideId> = cmd.ordered.iter().copied().collect();
        let current: HashSet<SlideId> = self.slides.iter().map(|s| s.id).collect();
        if requested.len() != cmd.ordered.len() || requested != current {
            return Err(DomainError::validation(
                "reorder must list every slide exactly once",
            ));
        }

        Ok(vec![SliderEvent::SlidesReordered(SlidesReordered {
            ordered: cmd.ordered.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }
}
