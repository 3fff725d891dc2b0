//! Diagnosis example: independent subsystems publish their field group,
//! then the collector reads the aggregate

use vigil_shared_memory::data::{DiagnosisStats, Timeval};
use vigil_shared_memory::{SegmentStore, ShmResult};

fn main() -> ShmResult<()> {
    vigil_shared_memory::init_tracing();

    println!("Vigil Diagnosis Monitor Example");
    println!("===============================");

    let store = SegmentStore::new();

    // The battery watcher publishes its group...
    let mut battery = DiagnosisStats::default();
    battery.tv_battery = Timeval::now();
    battery.battery_level = 87;
    store.write_diagnosis_battery(&battery)?;
    println!("✓ Battery group published (87%)");

    // ...the fan watcher its own, at its own pace.
    let mut fan = DiagnosisStats::default();
    fan.tv_fan = Timeval::now();
    fan.fan = 1;
    store.write_diagnosis_fan(&fan)?;
    println!("✓ Fan group published (ok)");

    // The collector sees both, plus whatever other groups last reported.
    let current = store.read_diagnosis_stats()?;
    println!("\nAggregate health:");
    println!("  battery {}% (at {})", { current.battery_level }, {
        current.tv_battery.sec
    });
    println!("  usb storage {}", { current.usb_storage });
    println!(
        "  cameras {} {} {} {}",
        { current.camera00 },
        { current.camera01 },
        { current.camera02 },
        { current.camera03 }
    );
    println!("  accelerometer {}", { current.accelerometer });
    println!("  fan {} (at {})", { current.fan }, { current.tv_fan.sec });

    Ok(())
}
