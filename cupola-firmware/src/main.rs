//! Cupola - Observatory Dome Rotation Controller
//!
//! Main firmware binary for RP2040 boards with a W5500 Ethernet module.
//! Build with `cargo build -p cupola-firmware --target thumbv6m-none-eabi`.
//!
//! Wiring:
//! - GPIO6: stepper direction, GPIO7: stepper step
//! - GPIO8: home sensor (active low, falling edge on crossing)
//! - SPI0 (GPIO16-19) + GPIO20/21: W5500 reset and interrupt

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_net::StackResources;
use embassy_net_wiznet::chip::W5500;
use embassy_net_wiznet::{Device, Runner as WiznetRunner, State as WiznetState};
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Async, Config as SpiConfig, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use rand_core::RngCore;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use cupola_core::config::DomeConfig;
use cupola_core::motion::DomeMotor;

mod channels;
mod tasks;

use channels::SharedDome;

type EthernetSpi = ExclusiveDevice<Spi<'static, SPI0, Async>, Output<'static>, Delay>;

static DOME: StaticCell<SharedDome> = StaticCell::new();
static WIZNET_STATE: StaticCell<WiznetState<8, 8>> = StaticCell::new();
static RESOURCES: StaticCell<StackResources<{ channels::MAX_CLIENTS + 2 }>> = StaticCell::new();

#[embassy_executor::task]
async fn ethernet_task(
    runner: WiznetRunner<'static, W5500, EthernetSpi, Input<'static>, Output<'static>>,
) -> ! {
    runner.run().await
}

#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, Device<'static>>) -> ! {
    runner.run().await
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Cupola firmware starting...");

    let p = embassy_rp::init(Default::default());
    let mut rng = RoscRng;
    info!("Peripherals initialized");

    // Dome geometry and loop timing
    let config = DomeConfig::default();
    info!(
        "Dome config: {} steps/rev, home={}, padding={}",
        config.max_position, config.home_position, config.trigger_padding
    );
    let dome = &*DOME.init(channels::shared_dome(DomeMotor::new(config)));

    // Stepper driver pins; the step line idles high between pulses
    let dir_pin = Output::new(p.PIN_6, Level::Low);
    let step_pin = Output::new(p.PIN_7, Level::High);

    // Home sensor pulls the input low on a crossing
    let sensor_pin = Input::new(p.PIN_8, Pull::Up);

    // W5500 Ethernet on SPI0
    let mut spi_cfg = SpiConfig::default();
    spi_cfg.frequency = 50_000_000;
    let spi = Spi::new(
        p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, p.DMA_CH0, p.DMA_CH1, spi_cfg,
    );
    let cs = Output::new(p.PIN_17, Level::High);
    let w5500_int = Input::new(p.PIN_21, Pull::Up);
    let w5500_reset = Output::new(p.PIN_20, Level::High);

    let mac_addr = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];
    let state = WIZNET_STATE.init(WiznetState::<8, 8>::new());
    let spi_device = ExclusiveDevice::new(spi, cs, Delay).unwrap();
    let (device, eth_runner) =
        embassy_net_wiznet::new(mac_addr, state, spi_device, w5500_int, w5500_reset)
            .await
            .unwrap();
    spawner.spawn(ethernet_task(eth_runner)).unwrap();
    info!("Ethernet initialized");

    // Network stack with DHCP
    let net_config = embassy_net::Config::dhcpv4(Default::default());
    let seed = rng.next_u64();
    let (stack, net_runner) = embassy_net::new(
        device,
        net_config,
        RESOURCES.init(StackResources::new()),
        seed,
    );
    spawner.spawn(net_task(net_runner)).unwrap();

    info!("Waiting for DHCP...");
    stack.wait_config_up().await;
    if let Some(cfg) = stack.config_v4() {
        info!("IP address: {}", cfg.address);
    }

    // Control tasks
    spawner.spawn(tasks::sensor_task(sensor_pin)).unwrap();
    spawner
        .spawn(tasks::motor_task(dome, &channels::HUB, step_pin, dir_pin))
        .unwrap();
    for outbox in channels::OUTBOXES.iter() {
        spawner
            .spawn(tasks::server_task(stack, dome, &channels::HUB, outbox))
            .unwrap();
    }

    info!(
        "All tasks spawned, dome listening on port {}",
        tasks::server::LISTEN_PORT
    );

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
