use chrono::Utc;

use storefront_catalog::{
    AddSlide, RemoveSlide, ReorderSlides, Slide, SlideId, SliderCommand, SliderLineup,
    UpdateSlide,
};
use storefront_core::{Aggregate, AggregateRoot, DomainError, Event, ExpectedVersion};

use super::ServiceError;
use crate::repository::SliderRepository;

/// Admin operations on the homepage slider lineup.
#[derive(Debug)]
pub struct SliderService<R> {
    repo: R,
}

impl<R> SliderService<R>
where
    R: SliderRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn lineup(&self) -> Result<SliderLineup, ServiceError> {
        Ok(self.repo.load()?)
    }

    /// Slots offered in the admin form; `editing` keeps that slide's own slot selectable.
    pub fn available_slots(&self, editing: Option<SlideId>) -> Result<Vec<usize>, ServiceError> {
        let lineup = self.repo.load()?;
        let editing = match editing {
            Some(id) => Some(lineup.slide(id).ok_or(DomainError::NotFound)?.order),
            None => None,
        };
        Ok(lineup.available_slots(editing))
    }

    pub fn add_slide(
        &self,
        image_url: impl Into<String>,
        title: Option<String>,
        order: Option<usize>,
    ) -> Result<Slide, ServiceError> {
        let slide_id = SlideId::generate();
        let lineup = self.execute(SliderCommand::AddSlide(AddSlide {
            slide_id,
            image_url: image_url.into(),
            title,
            order,
            occurred_at: Utc::now(),
        }))?;
        slide_of(&lineup, slide_id)
    }

    pub fn update_slide(
        &self,
        slide_id: SlideId,
        image_url: Option<String>,
        title: Option<String>,
        order: Option<usize>,
    ) -> Result<Slide, ServiceError> {
        let lineup = self.execute(SliderCommand::UpdateSlide(UpdateSlide {
            slide_id,
            image_url,
            title,
            order,
            occurred_at: Utc::now(),
        }))?;
        slide_of(&lineup, slide_id)
    }

    pub fn remove_slide(&self, slide_id: SlideId) -> Result<SliderLineup, ServiceError> {
        self.execute(SliderCommand::RemoveSlide(RemoveSlide {
            slide_id,
            occurred_at: Utc::now(),
        }))
    }

    pub fn reorder(&self, ordered: Vec<SlideId>) -> Result<SliderLineup, ServiceError> {
        self.execute(SliderCommand::ReorderSlides(ReorderSlides {
            ordered,
            occurred_at: Utc::now(),
        }))
    }

    /// Add `slides` when the lineup is empty; returns how many were added.
    pub fn seed_if_empty(&self, slides: Vec<AddSlide>) -> Result<usize, ServiceError> {
        if !self.repo.load()?.is_empty() {
            return Ok(0);
        }
        let count = slides.len();
        for slide in slides {
            self.execute(SliderCommand::AddSlide(slide))?;
        }
        tracing::info!(count, "seeded demo slides");
        Ok(count)
    }

    fn execute(&self, command: SliderCommand) -> Result<SliderLineup, ServiceError> {
        let mut lineup = self.repo.load()?;
        let expected = ExpectedVersion::Exact(lineup.version());

        let events = lineup.handle(&command).inspect_err(|err| {
            tracing::info!(error = %err, "slider command rejected");
        })?;
        for event in &events {
            lineup.apply(event);
            tracing::info!(event_type = event.event_type(), slides = lineup.len(), "slider event applied");
        }

        self.repo.save(lineup.clone(), expected)?;
        Ok(lineup)
    }
}

fn slide_of(lineup: &SliderLineup, slide_id: SlideId) -> Result<Slide, ServiceError> {
    lineup
        .slide(slide_id)
        .cloned()
        .ok_or(ServiceError::Domain(DomainError::NotFound))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use storefront_catalog::MAX_SLIDES;

    use super::*;
    use crate::repository::InMemorySliderRepository;

    fn service() -> SliderService<Arc<InMemorySliderRepository>> {
        SliderService::new(Arc::new(InMemorySliderRepository::new()))
    }

    fn url(n: usize) -> String {
        format!("https://img/banner-{n}.png")
    }

    #[test]
    fn slides_fill_the_lowest_free_slot() {
        let sliders = service();
        let first = sliders.add_slide(url(0), None, None).unwrap();
        let third = sliders.add_slide(url(2), Some("Sale".into()), Some(2)).unwrap();
        let second = sliders.add_slide(url(1), None, None).unwrap();

        assert_eq!(first.title, "No Title");
        assert_eq!((first.order, second.order, third.order), (0, 1, 2));
        assert_eq!(sliders.available_slots(None).unwrap(), vec![3, 4]);
        assert_eq!(
            sliders.available_slots(Some(third.id)).unwrap(),
            vec![2, 3, 4]
        );
    }

    #[test]
    fn lineup_is_capped_and_never_emptied() {
        let sliders = service();
        let mut ids = Vec::new();
        for n in 0..MAX_SLIDES {
            ids.push(sliders.add_slide(url(n), None, None).unwrap().id);
        }
        let err = sliders.add_slide(url(9), None, None).unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::InvariantViolation(_))));

        for id in &ids[1..] {
            sliders.remove_slide(*id).unwrap();
        }
        let err = sliders.remove_slide(ids[0]).unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::InvariantViolation(_))));
        assert_eq!(sliders.lineup().unwrap().len(), 1);
    }

    #[test]
    fn remove_and_reorder_renumber_slots() {
        let sliders = service();
        let a = sliders.add_slide(url(0), None, None).unwrap().id;
        let b = sliders.add_slide(url(1), None, None).unwrap().id;
        let c = sliders.add_slide(url(2), None, None).unwrap().id;

        let lineup = sliders.remove_slide(b).unwrap();
        let orders: Vec<_> = lineup.slides().iter().map(|s| (s.id, s.order)).collect();
        assert_eq!(orders, vec![(a, 0), (c, 1)]);

        let lineup = sliders.reorder(vec![c, a]).unwrap();
        let ids: Vec<_> = lineup.slides().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![c, a]);

        assert!(sliders.reorder(vec![c]).is_err());
    }

    #[test]
    fn update_moves_to_a_free_slot_only() {
        let sliders = service();
        let a = sliders.add_slide(url(0), None, None).unwrap();
        let b = sliders.add_slide(url(1), None, None).unwrap();

        let moved = sliders.update_slide(a.id, None, Some("Hero".into()), Some(4)).unwrap();
        assert_eq!((moved.order, moved.title.as_str()), (4, "Hero"));
        assert_eq!(moved.image_url, a.image_url);

        let err = sliders.update_slide(a.id, None, None, Some(b.order)).unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::Validation(_))));
        assert!(sliders.update_slide(SlideId::generate(), None, None, None).unwrap_err().is_not_found());
    }

    #[test]
    fn seeding_only_fills_an_empty_lineup() {
        let sliders = service();
        assert_eq!(sliders.seed_if_empty(crate::seed::demo_slides(Utc::now())).unwrap(), 2);
        assert_eq!(sliders.seed_if_empty(crate::seed::demo_slides(Utc::now())).unwrap(), 0);
        let titles: Vec<_> = sliders
            .lineup()
            .unwrap()
            .slides()
            .iter()
            .map(|s| s.title.clone())
            .collect();
        assert_eq!(titles, vec!["Welcome to SERVER48", "Premium Tech Gear"]);
    }
}
