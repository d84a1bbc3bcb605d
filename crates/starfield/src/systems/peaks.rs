//! Peak flare scheduling: `idle → peaking → idle`, with a global cap.

use serde::{Deserialize, Serialize};

use crate::components::star::Star;

/// Which due stars win a free flare slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeakAdmission {
    /// Field order wins. A star can be deferred indefinitely if earlier
    /// stars keep claiming the slots.
    #[default]
    InOrder,
    /// The star whose scheduled start is oldest wins.
    EarliestDue,
}

/// Transitions performed by one scheduler update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeakTransitions {
    pub started: usize,
    pub finished: usize,
}

/// Decides which stars flare, keeping at most `max_simultaneous` peaking.
pub struct PeakScheduler {
    max_simultaneous: usize,
    admission: PeakAdmission,
    /// Scratch list of due star indices (EarliestDue only).
    due: Vec<usize>,
}

impl PeakScheduler {
    pub fn new(max_simultaneous: usize, admission: PeakAdmission) -> Self {
        Self {
            max_simultaneous,
            admission,
            due: Vec::new(),
        }
    }

    pub fn max_simultaneous(&self) -> usize {
        self.max_simultaneous
    }

    /// Retire finished flares, then admit due stars into free slots.
    ///
    /// Retiring first means a slot freed this instant can be reused this
    /// instant, and the cap holds after every call.
    pub fn update(&mut self, stars: &mut [Star], now: f64) -> PeakTransitions {
        let mut transitions = PeakTransitions::default();

        for star in stars.iter_mut() {
            if matches!(star.peak_progress(now), Some(t) if t >= 1.0) {
                star.end_peak(now);
                transitions.finished += 1;
                log::trace!("starfield: peak ended at {:.0}, next at {:.0}", now, star.peak_start());
            }
        }

        let mut active = stars.iter().filter(|s| s.is_peaking()).count();
        if active >= self.max_simultaneous {
            return transitions;
        }

        match self.admission {
            PeakAdmission::InOrder => {
                for star in stars.iter_mut() {
                    if active >= self.max_simultaneous {
                        break;
                    }
                    if star.is_due(now) {
                        star.begin_peak(now);
                        active += 1;
                        transitions.started += 1;
                    }
                }
            }
            PeakAdmission::EarliestDue => {
                self.due.clear();
                self.due
                    .extend(stars.iter().enumerate().filter(|(_, s)| s.is_due(now)).map(|(i, _)| i));
                self.due
                    .sort_by(|&a, &b| stars[a].peak_start().total_cmp(&stars[b].peak_start()));
                for &i in self.due.iter().take(self.max_simultaneous - active) {
                    stars[i].begin_peak(now);
                    transitions.started += 1;
                }
            }
        }

        if transitions.started > 0 {
            log::trace!("starfield: {} peak(s) started at {:.0}", transitions.started, now);
        }
        transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::star::tests::star_at;
    use crate::components::star::PeakPhase;

    fn due_stars(n: usize, next_start: f64) -> Vec<Star> {
        (0..n)
            .map(|i| {
                let mut s = star_at(i as f64, 0.0);
                s.peak = PeakPhase::Idle { next_start };
                s
            })
            .collect()
    }

    #[test]
    fn cap_limits_simultaneous_peaks() {
        let mut stars = due_stars(20, 0.0);
        let mut scheduler = PeakScheduler::new(4, PeakAdmission::InOrder);
        let t = scheduler.update(&mut stars, 100.0);
        assert_eq!(t.started, 4);
        assert_eq!(stars.iter().filter(|s| s.is_peaking()).count(), 4);

        // Nothing new while the slots are full.
        let t = scheduler.update(&mut stars, 200.0);
        assert_eq!(t, PeakTransitions::default());
    }

    #[test]
    fn in_order_admission_favours_field_order() {
        let mut stars = due_stars(6, 0.0);
        let mut scheduler = PeakScheduler::new(2, PeakAdmission::InOrder);
        scheduler.update(&mut stars, 1.0);
        let peaking: Vec<bool> = stars.iter().map(|s| s.is_peaking()).collect();
        assert_eq!(peaking, vec![true, true, false, false, false, false]);
    }

    #[test]
    fn earliest_due_admission_favours_oldest_schedule() {
        let mut stars = due_stars(5, 0.0);
        let starts = [400.0, 100.0, 300.0, 50.0, 200.0];
        for (s, &start) in stars.iter_mut().zip(starts.iter()) {
            s.peak = PeakPhase::Idle { next_start: start };
        }
        let mut scheduler = PeakScheduler::new(2, PeakAdmission::EarliestDue);
        scheduler.update(&mut stars, 1_000.0);
        let peaking: Vec<bool> = stars.iter().map(|s| s.is_peaking()).collect();
        assert_eq!(peaking, vec![false, true, false, true, false]);
    }

    #[test]
    fn stars_not_yet_due_stay_idle() {
        let mut stars = due_stars(3, 5_000.0);
        let mut scheduler = PeakScheduler::new(4, PeakAdmission::InOrder);
        assert_eq!(scheduler.update(&mut stars, 4_999.0).started, 0);
        assert_eq!(scheduler.update(&mut stars, 5_000.0).started, 3);
    }

    #[test]
    fn finished_peak_is_rescheduled_one_gap_later() {
        let mut stars = due_stars(1, 0.0);
        stars[0].peak_duration = 10_000.0;
        stars[0].peak_gap = 20_000.0;
        let mut scheduler = PeakScheduler::new(4, PeakAdmission::InOrder);

        scheduler.update(&mut stars, 1_000.0);
        assert_eq!(stars[0].peak, PeakPhase::Peaking { start: 1_000.0, end: 11_000.0 });

        // Still peaking just before the end.
        scheduler.update(&mut stars, 10_999.0);
        assert!(stars[0].is_peaking());

        let t = scheduler.update(&mut stars, 11_000.0);
        assert_eq!(t.finished, 1);
        assert_eq!(stars[0].peak, PeakPhase::Idle { next_start: 31_000.0 });
    }

    #[test]
    fn freed_slot_is_reused_in_the_same_update() {
        let mut stars = due_stars(2, 0.0);
        stars[1].peak = PeakPhase::Idle { next_start: 10_500.0 };
        let mut scheduler = PeakScheduler::new(1, PeakAdmission::InOrder);

        scheduler.update(&mut stars, 500.0); // star 0: 500 → 10_500
        assert!(stars[0].is_peaking());

        let t = scheduler.update(&mut stars, 10_500.0);
        assert_eq!(t, PeakTransitions { started: 1, finished: 1 });
        assert!(!stars[0].is_peaking());
        assert!(stars[1].is_peaking());
    }

    #[test]
    fn zero_cap_never_peaks() {
        let mut stars = due_stars(3, 0.0);
        let mut scheduler = PeakScheduler::new(0, PeakAdmission::EarliestDue);
        assert_eq!(scheduler.update(&mut stars, 100.0).started, 0);
    }
}
