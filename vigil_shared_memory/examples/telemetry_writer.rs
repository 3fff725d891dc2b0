//! Simple producer example: publish one round of telemetry

use vigil_shared_memory::data::{Accelerometer, PositionPhase, TegraStats, Timeval};
use vigil_shared_memory::{SegmentStore, ShmResult};

fn main() -> ShmResult<()> {
    vigil_shared_memory::init_tracing();

    println!("Vigil Telemetry Writer Example");
    println!("==============================");

    let store = SegmentStore::new();

    let mut sample = Accelerometer::default();
    sample.tv = Timeval::now();
    sample.x = -12;
    sample.y = 34;
    sample.z = 1002;
    sample.vt = 8;

    store.write_accelerometer(&sample)?;
    println!("✓ Accelerometer sample published");

    let mut stats = TegraStats::default();
    stats.tv = Timeval::now();
    stats.ram = 1820;
    stats.cpu = 37.5;
    stats.gpu = 49.0;

    store.write_tegra_stats(&stats)?;
    println!("✓ Host stats published");

    store.write_position_phase(&PositionPhase::pending(0, 0.7, 0.2))?;
    println!("✓ Position-phase observation deposited for camera 0");

    println!("\nSegments now live:");
    for info in store.list_segments()? {
        println!("  key {} ({} bytes)", info.key, info.size);
    }

    println!("\nRun the reader example to consume:");
    println!("  cargo run --example telemetry_reader");

    Ok(())
}
