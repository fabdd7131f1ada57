//! Polls a PAA5100EJ on an ESP32-C3 and logs the accumulated displacement.
//!
//! Wiring: SCK GPIO6, MOSI GPIO7, MISO GPIO2, CS GPIO10.
#![no_std]
#![no_main]

use defmt::{info, warn};
use embedded_hal::delay::DelayNs;
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::main;
use esp_hal::spi::master::{Config as SpiConfig, Spi};
use esp_hal::spi::Mode;
use esp_hal::time::{Instant, Rate};
use paa5100ej::{Clock, Config, Error, Paa5100ej};
use panic_rtt_target as _;

esp_bootloader_esp_idf::esp_app_desc!();

/// Milliseconds since boot from the esp-hal system timer.
struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&mut self) -> u64 {
        Instant::now().duration_since_epoch().as_millis()
    }
}

#[main]
fn main() -> ! {
    rtt_target::rtt_init_defmt!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    let bus = Spi::new(
        peripherals.SPI2,
        SpiConfig::default()
            .with_frequency(Rate::from_mhz(2))
            .with_mode(Mode::_3),
    )
    .unwrap()
    .with_sck(peripherals.GPIO6)
    .with_mosi(peripherals.GPIO7)
    .with_miso(peripherals.GPIO2);
    let cs = Output::new(peripherals.GPIO10, Level::High, OutputConfig::default());
    let spi = ExclusiveDevice::new(bus, cs, Delay::new()).unwrap();

    let mut delay = Delay::new();
    let sensor_config = Config::new().rotation(paa5100ej::Rotation::Deg0).build();
    let mut sensor =
        match Paa5100ej::initialize_spi(spi, Delay::new(), SystemClock, sensor_config) {
            Ok(sensor) => sensor,
            Err(err) => panic!("PAA5100EJ init failed: {:?}", err),
        };

    let (mut total_x, mut total_y) = (0i32, 0i32);
    loop {
        match sensor.motion() {
            Ok(sample) => {
                total_x += i32::from(sample.x);
                total_y += i32::from(sample.y);
                info!(
                    "motion {} {} x: {} y: {}",
                    sample.x,
                    sample.y,
                    total_x,
                    total_y
                );
            }
            Err(Error::Timeout) => continue,
            Err(err) => warn!("motion read failed: {}", defmt::Debug2Format(&err)),
        }
        delay.delay_ms(10);
    }
}
