//! Parameterized ES|QL tools, grouped by the agent that uses them.
//!
//! Placeholders are written `?name` and bound by the console from the tool
//! parameters at call time.

use super::{ParamType, ToolDefinition, ToolKind, ToolParameter};

pub const TRIAGE_TOOLS: [&str; 3] =
    ["latest_vitals", "patient_record", "ward_patients_by_severity"];
pub const RECOVERY_TOOLS: [&str; 2] = ["vitals_trend", "vitals_statistics"];
pub const CAPACITY_TOOLS: [&str; 3] = ["ward_status", "specific_ward", "patients_in_ward"];
pub const DISCHARGE_TOOLS: [&str; 2] = ["readiness_check", "recent_vitals_stability"];
pub const GUARDIAN_TOOLS: [&str; 3] =
    ["deterioration_check", "recent_decisions", "critical_patients_scan"];

fn esql(
    name: &'static str,
    description: &'static str,
    query: &str,
    parameters: Vec<ToolParameter>,
) -> ToolDefinition {
    ToolDefinition {
        name,
        description,
        kind: ToolKind::Esql {
            query: query.to_string(),
        },
        parameters,
    }
}

fn patient_param(description: &'static str) -> ToolParameter {
    ToolParameter::required("patient_id", ParamType::String, description)
}

fn ward_param(description: &'static str) -> ToolParameter {
    ToolParameter::required("ward", ParamType::String, description)
}

// ═══════════════════════════════════════════════════════════
// Triage
// ═══════════════════════════════════════════════════════════

pub fn latest_vitals() -> ToolDefinition {
    esql(
        "latest_vitals",
        "Retrieve the most recent vital signs for a specific patient. Returns heart_rate, \
         systolic_bp, diastolic_bp, oxygen_saturation, temperature, respiratory_rate, and pain_score.",
        concat!(
            "FROM metrics-patient-vitals ",
            "| WHERE patient_id == ?patient_id ",
            "| SORT @timestamp DESC ",
            "| LIMIT 1",
        ),
        vec![patient_param("Patient ID (e.g., PAT-001)")],
    )
}

pub fn patient_record() -> ToolDefinition {
    esql(
        "patient_record",
        "Retrieve the full patient record including demographics, diagnosis, severity, \
         ward assignment, comorbidities, and status.",
        "FROM patients | WHERE patient_id == ?patient_id | LIMIT 1",
        vec![patient_param("Patient ID (e.g., PAT-001)")],
    )
}

pub fn ward_patients_by_severity() -> ToolDefinition {
    esql(
        "ward_patients_by_severity",
        "List all patients in a specific ward, sorted by severity (critical first, then high, \
         moderate, low). Useful for triage prioritization and ward overview.",
        concat!(
            "FROM patients ",
            "| WHERE ward == ?ward AND status == \"admitted\" ",
            "| EVAL severity_rank = CASE(",
            "severity == \"critical\", 1, ",
            "severity == \"high\", 2, ",
            "severity == \"moderate\", 3, ",
            "4) ",
            "| SORT severity_rank ASC ",
            "| DROP severity_rank",
        ),
        vec![ward_param("Ward name (e.g., ICU, surgical, cardiac, emergency)")],
    )
}

// ═══════════════════════════════════════════════════════════
// Recovery
// ═══════════════════════════════════════════════════════════

pub fn vitals_trend() -> ToolDefinition {
    esql(
        "vitals_trend",
        "Get hourly-averaged vital sign trends for a patient over the last 48 hours. Returns \
         time-bucketed averages of all vital signs, useful for spotting recovery trajectories \
         or deterioration patterns.",
        concat!(
            "FROM metrics-patient-vitals ",
            "| WHERE patient_id == ?patient_id ",
            "| EVAL bucket = DATE_TRUNC(1 hour, @timestamp) ",
            "| STATS ",
            "avg_hr = AVG(heart_rate), ",
            "avg_systolic = AVG(systolic_bp), ",
            "avg_diastolic = AVG(diastolic_bp), ",
            "avg_o2 = AVG(oxygen_saturation), ",
            "avg_temp = AVG(temperature), ",
            "avg_rr = AVG(respiratory_rate), ",
            "avg_pain = AVG(pain_score), ",
            "readings = COUNT(*) ",
            "BY bucket ",
            "| SORT bucket ASC",
        ),
        vec![patient_param("Patient ID (e.g., PAT-002)")],
    )
}

pub fn vitals_statistics() -> ToolDefinition {
    esql(
        "vitals_statistics",
        "Get overall vital sign statistics (min, max, average) for a patient over the entire \
         admission period. Useful for understanding the range of values and overall recovery \
         trajectory.",
        concat!(
            "FROM metrics-patient-vitals ",
            "| WHERE patient_id == ?patient_id ",
            "| STATS ",
            "min_hr = MIN(heart_rate), max_hr = MAX(heart_rate), avg_hr = AVG(heart_rate), ",
            "min_systolic = MIN(systolic_bp), max_systolic = MAX(systolic_bp), avg_systolic = AVG(systolic_bp), ",
            "min_o2 = MIN(oxygen_saturation), max_o2 = MAX(oxygen_saturation), avg_o2 = AVG(oxygen_saturation), ",
            "min_temp = MIN(temperature), max_temp = MAX(temperature), avg_temp = AVG(temperature), ",
            "min_rr = MIN(respiratory_rate), max_rr = MAX(respiratory_rate), avg_rr = AVG(respiratory_rate), ",
            "min_pain = MIN(pain_score), max_pain = MAX(pain_score), avg_pain = AVG(pain_score), ",
            "total_readings = COUNT(*)",
        ),
        vec![patient_param("Patient ID")],
    )
}

// ═══════════════════════════════════════════════════════════
// Capacity
// ═══════════════════════════════════════════════════════════

pub fn ward_status() -> ToolDefinition {
    esql(
        "ward_status",
        "Get current capacity status for ALL hospital wards including bed counts, occupancy \
         rate, ventilator availability, and staffing ratios. Essential for placement and \
         transfer decisions.",
        "FROM hospital-capacity | SORT occupancy_rate DESC",
        vec![],
    )
}

pub fn specific_ward() -> ToolDefinition {
    esql(
        "specific_ward",
        "Get detailed capacity information for a specific ward including all bed counts, \
         ventilator status, and staffing levels.",
        "FROM hospital-capacity | WHERE ward == ?ward | LIMIT 1",
        vec![ward_param("Ward name (e.g., ICU, surgical, cardiac)")],
    )
}

pub fn patients_in_ward() -> ToolDefinition {
    esql(
        "patients_in_ward",
        "List all currently admitted patients in a specific ward with their diagnosis and \
         severity. Useful for capacity planning and understanding ward composition.",
        concat!(
            "FROM patients ",
            "| WHERE ward == ?ward AND status == \"admitted\" ",
            "| KEEP patient_id, name, age, diagnosis, severity, admitted_at",
        ),
        vec![ward_param("Ward name")],
    )
}

// ═══════════════════════════════════════════════════════════
// Discharge
// ═══════════════════════════════════════════════════════════

pub fn readiness_check() -> ToolDefinition {
    esql(
        "readiness_check",
        "Check the current discharge readiness for a patient. Returns the discharge plan with \
         all 7 criteria assessments, criteria met count, current status, and target discharge date.",
        concat!(
            "FROM discharge-plans ",
            "| WHERE patient_id == ?patient_id ",
            "| SORT updated_at DESC ",
            "| LIMIT 1",
        ),
        vec![patient_param("Patient ID")],
    )
}

pub fn recent_vitals_stability() -> ToolDefinition {
    esql(
        "recent_vitals_stability",
        "Analyze vital sign stability over the last 24 hours for discharge evaluation. Returns \
         the range of key vitals; low variance indicates stability suitable for discharge.",
        concat!(
            "FROM metrics-patient-vitals ",
            "| WHERE patient_id == ?patient_id ",
            "AND @timestamp > NOW() - 24 hours ",
            "| STATS ",
            "avg_hr = AVG(heart_rate), ",
            "min_hr = MIN(heart_rate), max_hr = MAX(heart_rate), ",
            "avg_o2 = AVG(oxygen_saturation), ",
            "min_o2 = MIN(oxygen_saturation), max_o2 = MAX(oxygen_saturation), ",
            "avg_temp = AVG(temperature), ",
            "min_temp = MIN(temperature), max_temp = MAX(temperature), ",
            "avg_rr = AVG(respiratory_rate), ",
            "min_rr = MIN(respiratory_rate), max_rr = MAX(respiratory_rate), ",
            "max_pain = MAX(pain_score), ",
            "readings = COUNT(*)",
        ),
        vec![patient_param("Patient ID")],
    )
}

// ═══════════════════════════════════════════════════════════
// Guardian
// ═══════════════════════════════════════════════════════════

/// Recent 3 hours against the prior 3 hours. A worsening trend is a signal
/// even when the absolute values are still in range.
pub fn deterioration_check() -> ToolDefinition {
    esql(
        "deterioration_check",
        "CRITICAL SAFETY TOOL: Compare the most recent 3-hour window of vitals against the \
         prior 3-hour window to detect deterioration. A worsening trend (rising HR, falling O2, \
         rising temp/RR) signals danger even if absolute values seem acceptable.",
        concat!(
            "FROM metrics-patient-vitals ",
            "| WHERE patient_id == ?patient_id ",
            "AND @timestamp > NOW() - 6 hours ",
            "| EVAL window = CASE(",
            "@timestamp > NOW() - 3 hours, \"recent\", ",
            "\"prior\") ",
            "| STATS ",
            "avg_hr = AVG(heart_rate), ",
            "avg_o2 = AVG(oxygen_saturation), ",
            "avg_temp = AVG(temperature), ",
            "avg_rr = AVG(respiratory_rate), ",
            "avg_systolic = AVG(systolic_bp), ",
            "avg_pain = AVG(pain_score), ",
            "readings = COUNT(*) ",
            "BY window ",
            "| SORT window ASC",
        ),
        vec![patient_param("Patient ID to check for deterioration")],
    )
}

pub fn recent_decisions() -> ToolDefinition {
    esql(
        "recent_decisions",
        "Retrieve recent agent decisions for a patient from the audit log. Useful for \
         understanding what assessments have already been made and ensuring consistency \
         across agent recommendations.",
        concat!(
            "FROM agent-decisions ",
            "| WHERE patient_id == ?patient_id ",
            "| SORT timestamp DESC ",
            "| LIMIT 10",
        ),
        vec![patient_param("Patient ID")],
    )
}

pub fn critical_patients_scan() -> ToolDefinition {
    esql(
        "critical_patients_scan",
        "PROACTIVE SAFETY SCAN: Get the latest vitals for ALL admitted patients, flagging any \
         with concerning values (HR > 110, O2 < 92, temp > 38.5, RR > 25). Used by Guardian \
         agent for hospital-wide safety monitoring.",
        concat!(
            "FROM metrics-patient-vitals ",
            "| STATS ",
            "latest_hr = MAX(heart_rate), ",
            "latest_o2 = MIN(oxygen_saturation), ",
            "latest_temp = MAX(temperature), ",
            "latest_rr = MAX(respiratory_rate), ",
            "latest_time = MAX(@timestamp) ",
            "BY patient_id, ward ",
            "| WHERE latest_hr > 110 OR latest_o2 < 92 ",
            "OR latest_temp > 38.5 OR latest_rr > 25 ",
            "| SORT latest_o2 ASC",
        ),
        vec![],
    )
}

/// All ES|QL tools in group order: triage, recovery, capacity, discharge,
/// guardian.
pub fn all_tools() -> Vec<ToolDefinition> {
    vec![
        latest_vitals(),
        patient_record(),
        ward_patients_by_severity(),
        vitals_trend(),
        vitals_statistics(),
        ward_status(),
        specific_ward(),
        patients_in_ward(),
        readiness_check(),
        recent_vitals_stability(),
        deterioration_check(),
        recent_decisions(),
        critical_patients_scan(),
    ]
}
