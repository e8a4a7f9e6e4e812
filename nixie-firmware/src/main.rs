//! Nixie - Six-tube nixie clock firmware
//!
//! Main firmware binary for RP2040-based clock boards. The tubes are
//! multiplexed over a shift-register chain from a high-priority
//! interrupt executor; everything else runs as tasks on the thread
//! executor.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::rtc::Rtc;
use embassy_rp::spi::Spi;
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUartRx, Config as UartConfig};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use nixie_core::config::{
    ClockConfig, Color, CLOCK_COLOR_SLOT, COUNTDOWN_COLOR_SLOT, DEFAULT_CLOCK_COLOR,
    DEFAULT_COUNTDOWN_COLOR, DISPLAY_SPI_HZ,
};
use nixie_core::display::MultiplexDriver;
use nixie_core::scheduler::Scheduler;
use nixie_core::task::DisplayTask;
use nixie_drivers::backlight::RgbBacklight;
use nixie_drivers::button::ButtonPanel;
use nixie_drivers::display::ShiftRegisterBus;
use nixie_hal_rp2040::flash::FlashStorage;
use nixie_hal_rp2040::spi::{to_rp_config, Mode, SpiConfig};

use crate::clock::RtcClock;
use crate::config::{ColorPersistence, ConfigPersistence};

mod channels;
mod clock;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// Executor for the display multiplexer
static EXECUTOR_DISPLAY: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_DISPLAY.on_interrupt()
}

// Static cell for the UART receive buffer (must live forever)
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Nixie clock firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Load settings from flash (or use defaults)
    let flash_storage = FlashStorage::new(p.FLASH, p.DMA_CH0);
    let mut persistence = ConfigPersistence::new(flash_storage);
    let config = persistence.load_or_default().await;

    let mut colors = ColorPersistence::new(persistence.into_storage());
    let clock_color = colors
        .load_color_or(CLOCK_COLOR_SLOT, DEFAULT_CLOCK_COLOR)
        .await;
    let countdown_color = colors
        .load_color_or(COUNTDOWN_COLOR_SLOT, DEFAULT_COUNTDOWN_COLOR)
        .await;
    info!("Settings loaded");

    // Setup SPI0 for the display shift registers
    // Pin assignments are board-specific (CLK=GPIO18, DATA=GPIO19, LATCH=GPIO17)
    let spi_config = match to_rp_config(&SpiConfig::new(DISPLAY_SPI_HZ, Mode::Mode2)) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Display SPI config rejected: {:?}", e);
            embassy_rp::spi::Config::default()
        }
    };
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let latch = Output::new(p.PIN_17, Level::High);
    let driver = MultiplexDriver::new(ShiftRegisterBus::new(spi, latch));

    info!("Display bus initialized");

    // Setup the RGB backlight
    // Pin assignments are board-specific (R=GPIO2, G=GPIO3, B=GPIO4)
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = u16::from(u8::MAX);
    let (Some(red), Some(green)) =
        Pwm::new_output_ab(p.PWM_SLICE1, p.PIN_2, p.PIN_3, pwm_config.clone()).split()
    else {
        panic!("PWM slice 1 has no outputs");
    };
    let (Some(blue), _) = Pwm::new_output_a(p.PWM_SLICE2, p.PIN_4, pwm_config).split() else {
        panic!("PWM slice 2 has no output A");
    };
    let backlight = RgbBacklight::new(red, green, blue);

    // Setup the front panel buttons (active-low, internal pull-ups)
    // Pin assignments are board-specific (SET=GPIO10, UP=GPIO11, DOWN=GPIO12)
    let panel = ButtonPanel::new(
        Input::new(p.PIN_10, Pull::Up),
        Input::new(p.PIN_11, Pull::Up),
        Input::new(p.PIN_12, Pull::Up),
        config.debounce_ms,
        config.long_press_ms,
    );

    // Setup UART0 RX for serial commands (115200 baud default)
    let rx_buf = RX_BUF.init([0u8; 64]);
    let rx = BufferedUartRx::new(p.UART0, Irqs, p.PIN_1, rx_buf, UartConfig::default());

    info!("Inputs initialized");

    let clock = RtcClock::new(Rtc::new(p.RTC));
    let scheduler = build_scheduler(config, clock_color, countdown_color);

    // The display runs above every other task
    interrupt::SWI_IRQ_1.set_priority(Priority::P1);
    let display_spawner = EXECUTOR_DISPLAY.start(interrupt::SWI_IRQ_1);
    display_spawner.spawn(tasks::display_task(driver)).unwrap();

    // Spawn tasks
    spawner.spawn(tasks::buttons_task(panel)).unwrap();
    spawner.spawn(tasks::serial_rx_task(rx)).unwrap();
    spawner.spawn(tasks::persist_task(colors)).unwrap();
    spawner
        .spawn(tasks::ui_task(scheduler, clock, backlight))
        .unwrap();

    info!("All tasks spawned, firmware running");
}

/// Create the scheduler with the clock and countdown tasks
fn build_scheduler(config: ClockConfig, clock_color: Color, countdown_color: Color) -> Scheduler {
    let mut scheduler = Scheduler::new(config);

    for task in [DisplayTask::clock(), DisplayTask::countdown()] {
        if let Err(e) = scheduler.spawn(task) {
            error!("Failed to add display task: {:?}", e);
        }
    }
    scheduler.set_slot_color(CLOCK_COLOR_SLOT, clock_color);
    scheduler.set_slot_color(COUNTDOWN_COLOR_SLOT, countdown_color);

    scheduler
}
