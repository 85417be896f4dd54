//! Replaying fixture steps against a page

use anyhow::{bail, Result};
use std::time::Duration;
use tracing::{debug, info};
use vitrine_page::{Page, PageSnapshot};
use vitrine_platform::{Key, ManualHost};

use crate::fixture::{Fixture, Step};

/// Simulated frame interval
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Upper bound on frames rendered by a single `settle` step
const MAX_SETTLE_FRAMES: usize = 1000;

/// Snapshots recorded while replaying a fixture
#[derive(Debug)]
pub struct RunReport {
    /// One entry per `snapshot` step, in order
    pub snapshots: Vec<PageSnapshot>,
    /// State once every step has run
    pub final_state: PageSnapshot,
}

/// Build the fixture's page on a manual clock
pub fn build_page(fixture: &Fixture) -> Result<Page<ManualHost>> {
    let doc = fixture.build_document()?;

    let host = ManualHost::new();
    host.set_reduced_motion(fixture.page.reduced_motion);
    if let Some(year) = fixture.page.year {
        host.set_year(year);
    }

    Ok(Page::new(
        doc,
        host,
        fixture.config.clone(),
        fixture.page.window_width,
    ))
}

/// Run every step of the fixture
pub fn run(fixture: &Fixture) -> Result<RunReport> {
    let mut page = build_page(fixture)?;
    let mut snapshots = Vec::new();

    for (index, step) in fixture.steps.iter().enumerate() {
        debug!("step {}: {:?}", index + 1, step);
        match step {
            Step::Key { key } => {
                let parsed = Key::from_name(key);
                if parsed == Key::Unknown {
                    bail!("Step {}: unknown key '{}'", index + 1, key);
                }
                page.press(parsed);
            }
            Step::Click { target } => {
                page.click(target);
            }
            Step::Focus { target } => {
                if page.document().get_by_id(target).is_none() {
                    bail!("Step {}: no element with id '{}'", index + 1, target);
                }
                page.focus(target);
            }
            Step::Type { target, value } => {
                page.type_text(target, value);
            }
            Step::Submit { target } => {
                page.submit(target);
            }
            Step::Resize { width } => {
                if !width.is_finite() || *width < 0.0 {
                    bail!("Step {}: invalid window width {}", index + 1, width);
                }
                page.resize(*width);
            }
            Step::MotionPreference { reduced } => {
                page.host().set_reduced_motion(*reduced);
                page.dispatch(vitrine_platform::Event::Window(
                    vitrine_platform::WindowEvent::MotionPreferenceChanged { reduced: *reduced },
                ));
            }
            Step::Wait { ms } => {
                let frames = ms.div_ceil(FRAME_INTERVAL.as_millis() as u64);
                render_frames(&mut page, frames as usize);
            }
            Step::Frames { count } => render_frames(&mut page, *count),
            Step::Settle => {
                let frames = settle(&mut page)?;
                debug!("settled after {} frame(s)", frames);
            }
            Step::Snapshot => snapshots.push(page.snapshot()),
        }
    }

    info!(
        "replayed {} step(s) over {}ms",
        fixture.steps.len(),
        page.host().elapsed().as_millis()
    );

    Ok(RunReport {
        snapshots,
        final_state: page.snapshot(),
    })
}

fn render_frames(page: &mut Page<ManualHost>, count: usize) {
    for _ in 0..count {
        page.host().advance(FRAME_INTERVAL);
        page.frame();
    }
}

fn is_idle(page: &Page<ManualHost>) -> bool {
    let animating = page
        .enhancer()
        .slider()
        .and_then(|s| page.document().strip(s.strip()))
        .is_some_and(|strip| strip.is_animating());
    !animating && !page.enhancer().resize_pending() && !page.enhancer().submission_pending()
}

fn settle(page: &mut Page<ManualHost>) -> Result<usize> {
    let mut frames = 0;
    while !is_idle(page) {
        if frames == MAX_SETTLE_FRAMES {
            bail!("Page did not settle within {} frames", MAX_SETTLE_FRAMES);
        }
        render_frames(page, 1);
        frames += 1;
    }
    Ok(frames)
}
