//! Button input task
//!
//! The button stands in for the platform's visibility and ambient
//! notifications:
//! - Short press wakes the face (shows it, leaves ambient)
//! - Long press turns the screen off, or back on
//! - No input for the configured timeout drops to ambient

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::{Input, Output};
use embassy_time::Timer;

use sunshine_core::face::LifecycleEvent;

use crate::channels::post;

/// Settling time after an edge
const DEBOUNCE_MS: u64 = 20;

/// Hold time that makes a press long
const LONG_PRESS_MS: u64 = 800;

/// Press kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Press {
    Short,
    Long,
}

/// Input task - button handling and ambient timeout
///
/// `button` is active low. `backlight` follows visibility.
#[embassy_executor::task]
pub async fn input_task(mut button: Input<'static>, mut backlight: Output<'static>, ambient_timeout_s: u16) {
    info!("Input task started");

    // The controller shows the face at startup
    let mut visible = true;
    let mut ambient = false;
    backlight.set_high();

    loop {
        let idle_timeout = visible && !ambient && ambient_timeout_s > 0;
        let press = if idle_timeout {
            match select(
                wait_press(&mut button),
                Timer::after_secs(ambient_timeout_s as u64),
            )
            .await
            {
                Either::First(press) => press,
                Either::Second(()) => {
                    debug!("Idle timeout, entering ambient");
                    ambient = true;
                    post(LifecycleEvent::AmbientModeChanged(true));
                    continue;
                }
            }
        } else {
            wait_press(&mut button).await
        };

        debug!("Button: {:?}", press);
        match press {
            Press::Long => {
                visible = !visible;
                if visible {
                    backlight.set_high();
                } else {
                    backlight.set_low();
                }
                post(LifecycleEvent::VisibilityChanged(visible));
            }
            Press::Short if !visible => {
                visible = true;
                backlight.set_high();
                post(LifecycleEvent::VisibilityChanged(true));
            }
            Press::Short => {}
        }

        if press == Press::Short && ambient {
            ambient = false;
            post(LifecycleEvent::AmbientModeChanged(false));
        }
    }
}

/// Wait for a debounced press and classify it on release
async fn wait_press(button: &mut Input<'static>) -> Press {
    loop {
        button.wait_for_falling_edge().await;
        Timer::after_millis(DEBOUNCE_MS).await;
        if button.is_low() {
            break;
        }
    }

    let press = match select(
        button.wait_for_rising_edge(),
        Timer::after_millis(LONG_PRESS_MS),
    )
    .await
    {
        Either::First(()) => Press::Short,
        Either::Second(()) => {
            button.wait_for_high().await;
            Press::Long
        }
    };
    Timer::after_millis(DEBOUNCE_MS).await;
    press
}
