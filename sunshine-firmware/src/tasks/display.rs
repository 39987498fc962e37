//! Display task
//!
//! Redraws the face whenever the controller or the sync task asks for it.
//! Each frame is built from the current face mode, the wall clock in the
//! face's time zone, and the latest weather snapshot.

use defmt::*;
use embassy_time::Instant;

use sunshine_core::config::FaceConfig;
use sunshine_display::{render, FaceView, Scene};

use crate::channels::{CLOCK, FACE_MODE, REDRAW, WEATHER};
use crate::display::Panel;

/// Display task - renders one frame per redraw request
#[embassy_executor::task]
pub async fn display_task(mut panel: Panel, config: &'static FaceConfig) {
    info!("Display task started");

    loop {
        REDRAW.wait().await;

        let mode = FACE_MODE.lock(|m| m.get());
        let uptime = Instant::now().as_millis();
        let local = CLOCK.lock(|clock| clock.get().local_time(uptime, mode.utc_offset_s));

        let store = WEATHER.lock().await;
        let view = FaceView::at(mode, &local, store.snapshot());
        let scene = Scene::compose(&view, config);

        if let Err(e) = render(&mut panel, &scene) {
            warn!("Render failed: {:?}", Debug2Format(&e));
        } else {
            trace!("Frame drawn ({} ops)", scene.ops().len());
        }
    }
}
