//! Simple consumer example: read the latest telemetry and drain the
//! position-phase mailbox

use vigil_shared_memory::{PhaseRead, SegmentStore, ShmResult};

fn main() -> ShmResult<()> {
    vigil_shared_memory::init_tracing();

    println!("Vigil Telemetry Reader Example");
    println!("==============================");

    let store = SegmentStore::new();

    let sample = store.read_accelerometer()?;
    println!(
        "Accelerometer: pos ({}, {}, {}) vt {} at {}.{:06}",
        { sample.x },
        { sample.y },
        { sample.z },
        { sample.vt },
        { sample.tv.sec },
        { sample.tv.usec }
    );

    let stats = store.read_tegra_stats()?;
    println!(
        "Host: ram {} MB, cpu {:.1}%, gpu {:.1}C",
        { stats.ram },
        { stats.cpu },
        { stats.gpu }
    );

    for camera in [0, 1] {
        match store.take_position_phase(camera)? {
            PhaseRead::Consumed(obs) => println!(
                "Camera {camera}: consumed observation p1 {:.2}, p2 {:.2}",
                { obs.p1 },
                { obs.p2 }
            ),
            PhaseRead::Stale(_) => println!("Camera {camera}: nothing pending"),
        }
    }

    Ok(())
}
