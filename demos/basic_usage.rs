use error_criteria::{
    CheckOptions, ErrorCode, ErrorCriteria, HandlerBuilder, ReportBuffer, define_error_codes,
};

define_error_codes! {
    SAMPLE_RATE_LOW = 200,
    SAMPLE_RATE_INVALID = 201,
}

fn validate_sample_rate(criteria: &ErrorCriteria, rate: f64) -> error_criteria::ErrorInstance {
    // Checks return the sentinel on success, so results can be collected
    // and triggered together.
    let options = CheckOptions::new().trace("validate_sample_rate");
    let low = criteria.greater_than_with(rate, 8_000.0, &options);
    if !low.is_no_error() {
        return criteria
            .get_error_from_code(SAMPLE_RATE_LOW)
            .with_point("validate_sample_rate");
    }
    criteria.limit_with(rate, Some(8_000.0), Some(192_000.0), &options)
}

fn main() {
    // 1. Build the registry: application codes plus the nine criteria
    let mut criteria = ErrorCriteria::from_builder(
        HandlerBuilder::new()
            .error(SAMPLE_RATE_LOW, "Sample rate is unusually low.", false)
            .error(SAMPLE_RATE_INVALID, "Sample rate is invalid.", true)
            .colors(false),
    );

    // 2. Move the limit criterion into the application's code range
    criteria.modify_error_criterion_code_by_name("limit", ErrorCode::const_new(210));

    println!("--- Registered criteria ---");
    for entry in criteria.criteria() {
        println!(
            "  {:>2} {:<12} -> {}",
            entry.criterion.index(),
            entry.criterion.name(),
            entry.code
        );
    }

    // 3. Validate a batch without exiting, capturing reports in memory
    println!("\n--- Dry run ---");
    let errors = [
        validate_sample_rate(&criteria, 44_100.0),
        validate_sample_rate(&criteria, 4_000.0),
        criteria.not_equal(2_u8, 0),
        validate_sample_rate(&criteria, 384_000.0),
    ];

    let mut reports = ReportBuffer::new(16, 512);
    match criteria.dispatch(&errors, &mut reports) {
        Some(code) => println!("  would exit with status {}", code),
        None => println!("  nothing critical"),
    }
    for entry in reports.get_all().iter().rev() {
        println!("  [{}] {}", entry.code, entry.rendered);
    }

    // 4. Trigger for real: the warning prints, the critical error exits
    println!("\n--- Trigger ---");
    criteria.trigger(&errors);
    println!("unreachable: the limit failure ends the process with status 210");
}
