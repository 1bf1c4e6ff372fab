//! Offline demo: decode a handful of real scheduling codes.

use sigaa_core::{expand_schedule, extract_periods, parse_instructors, parse_workload};

fn main() {
    let codes = [
        "7M2345 6T2345 (09/05/2025 - 31/05/2025)",
        "7T1234 6N1234 (09/05/2025 - 31/05/2025)",
        "3M3456 (22/06/2025 - 25/07/2025)",
        "25M34 (17/03/2025 - 26/07/2025)",
        "6M456 (17/03/2025 - 27/03/2025), 6M456 (31/03/2025 - 16/05/2025)",
        "7M2345 6T2345",
    ];

    for code in codes {
        println!("{}", code);
        for entry in expand_schedule(code) {
            println!(
                "  {} {}-{} [{} .. {}]",
                entry.day, entry.start_time, entry.end_time, entry.start_period, entry.end_period
            );
        }
        for period in extract_periods(code) {
            println!("  period: {} .. {}", period.start_date, period.end_date);
        }
        println!();
    }

    let instructor = "ANTONIO BATISTA DA SILVA OLIVEIRA e MIGUEL EDUARDO MORENO ANEZ (15h)";
    println!("{}", instructor);
    println!("  instructors: {:?}", parse_instructors(instructor));
    println!("  workload: {:?}", parse_workload(instructor));
}
