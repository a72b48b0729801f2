// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers translate requests into domain types, run the core allocator
//! or planner, persist the result, and persist exactly one audit event
//! per successful state change.

use tracing::info;

use docket::{
    AllocationOutcome, AllocationRequest, AllocationResult, Clock, allocate_case_number,
    plan_revenue_target,
};
use docket_audit::{Action, Actor, AuditEvent, AuditSubject, Cause};
use docket_domain::{
    Case, CaseCategory, CaseNumber, DepartmentCode, DomainError, FirmPrefix, RevenueTarget,
    validate_department_code, validate_firm_prefix,
};
use docket_persistence::{Persistence, PersistenceError};

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    CaseInfo, CreateDepartmentRequest, CreateDepartmentResponse, EscalateCaseRequest,
    EscalateCaseResponse, GetRevenueTargetResponse, OpenCaseRequest, OpenCaseResponse,
    RegisterFirmRequest, RegisterFirmResponse, SetRevenueTargetRequest, SetRevenueTargetResponse,
};
use crate::target_policy::TargetPolicy;

fn internal(context: &str, err: &PersistenceError) -> ApiError {
    ApiError::Internal {
        message: format!("{context}: {err}"),
    }
}

/// Registers a new firm.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The firm registration request
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The prefix is malformed or already registered
/// - The name is empty
/// - Persistence fails
pub fn register_firm(
    persistence: &mut Persistence,
    request: RegisterFirmRequest,
    actor: Actor,
    cause: Cause,
) -> Result<RegisterFirmResponse, ApiError> {
    validate_firm_prefix(&request.prefix).map_err(translate_domain_error)?;
    if request.name.trim().is_empty() {
        return Err(translate_domain_error(DomainError::InvalidName(
            String::from("Firm name must not be empty"),
        )));
    }

    let prefix: FirmPrefix = FirmPrefix::new(&request.prefix);
    let already_registered: bool = persistence
        .firm_prefix_exists(&prefix)
        .map_err(|e| internal("Failed to check firm prefix", &e))?;
    if already_registered {
        return Err(translate_domain_error(DomainError::DuplicateFirmPrefix(
            prefix.value().to_owned(),
        )));
    }

    let firm_id: i64 = persistence
        .register_firm(&prefix, &request.name)
        .map_err(|e| internal("Failed to register firm", &e))?;

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(String::from("RegisterFirm"), None),
        AuditSubject::Registry {
            entity: String::from("firm"),
            identifier: prefix.value().to_owned(),
        },
    );
    let event_id: i64 = persistence
        .persist_audit_event(&audit_event)
        .map_err(|e| internal("Failed to persist audit event", &e))?;

    info!(firm_id, prefix = prefix.value(), "Registered firm");

    Ok(RegisterFirmResponse {
        firm_id,
        prefix: prefix.value().to_owned(),
        event_id,
        message: format!("Firm '{}' registered", request.name),
    })
}

/// Creates a department within a firm.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The department creation request
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The code is malformed or already exists within the firm
/// - The firm does not exist
/// - Persistence fails
pub fn create_department(
    persistence: &mut Persistence,
    request: CreateDepartmentRequest,
    actor: Actor,
    cause: Cause,
) -> Result<CreateDepartmentResponse, ApiError> {
    validate_department_code(&request.code).map_err(translate_domain_error)?;
    if request.name.trim().is_empty() {
        return Err(translate_domain_error(DomainError::InvalidName(
            String::from("Department name must not be empty"),
        )));
    }

    let firm_exists: bool = persistence
        .firm_exists(request.firm_id)
        .map_err(|e| internal("Failed to check firm", &e))?;
    if !firm_exists {
        return Err(translate_domain_error(DomainError::FirmNotFound(
            request.firm_id,
        )));
    }

    let code: DepartmentCode = DepartmentCode::new(&request.code);
    let duplicate: bool = persistence
        .department_code_exists(request.firm_id, &code)
        .map_err(|e| internal("Failed to check department code", &e))?;
    if duplicate {
        return Err(translate_domain_error(
            DomainError::DuplicateDepartmentCode {
                firm_id: request.firm_id,
                code: code.value().to_owned(),
            },
        ));
    }

    let department_id: i64 = persistence
        .create_department(request.firm_id, &code, &request.name)
        .map_err(|e| internal("Failed to create department", &e))?;

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(String::from("CreateDepartment"), None),
        AuditSubject::Registry {
            entity: String::from("department"),
            identifier: code.value().to_owned(),
        },
    );
    let event_id: i64 = persistence
        .persist_audit_event(&audit_event)
        .map_err(|e| internal("Failed to persist audit event", &e))?;

    info!(
        department_id,
        firm_id = request.firm_id,
        code = code.value(),
        "Created department"
    );

    Ok(CreateDepartmentResponse {
        department_id,
        firm_id: request.firm_id,
        code: code.value().to_owned(),
        event_id,
        message: format!("Department '{}' created", request.name),
    })
}

/// Opens a new case, allocating its case number.
///
/// Sequential numbering is best-effort: a missing firm or department
/// degrades to a fallback identifier and the case is still created.
/// A failing counter or case store fails the whole operation; no case is
/// created with a guessed number.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `clock` - The time source for year derivation and the open date
/// * `request` - The case opening request
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The category is not recognized
/// - The counter or case store fails
/// - Persisting the case or audit event fails
pub fn open_case(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    request: OpenCaseRequest,
    actor: Actor,
    cause: Cause,
) -> Result<OpenCaseResponse, ApiError> {
    let category: CaseCategory =
        CaseCategory::parse(&request.category).map_err(translate_domain_error)?;

    let allocation: AllocationResult = allocate_case_number(
        persistence,
        clock,
        actor,
        cause,
        &AllocationRequest {
            firm_id: request.firm_id,
            department_id: request.department_id,
            escalated: false,
        },
    )
    .map_err(translate_core_error)?;

    let sequential: bool = matches!(allocation.outcome, AllocationOutcome::Sequential { .. });
    let case_number: CaseNumber = allocation.outcome.case_number().clone();

    let case: Case = Case::new(
        case_number.clone(),
        request.firm_id,
        request.department_id,
        category,
        false,
        None,
        clock.now_utc().date(),
    );
    let case_id: i64 = persistence
        .insert_case(&case)
        .map_err(|e| internal("Failed to persist case", &e))?;
    let event_id: i64 = persistence
        .persist_audit_event(&allocation.audit_event)
        .map_err(|e| internal("Failed to persist audit event", &e))?;

    info!(
        case_id,
        case_number = case_number.value(),
        sequential,
        "Opened case"
    );

    Ok(OpenCaseResponse {
        case_id,
        case_number: case_number.into_value(),
        sequential,
        event_id,
        message: String::from("Case opened"),
    })
}

/// Escalates a credit case into the legal workflow.
///
/// A new legal case is created, numbered from the escalated sequence of
/// the originating case's firm and department, and linked back to the
/// originating case.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `clock` - The time source for year derivation and the open date
/// * `request` - The escalation request
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The originating case does not exist
/// - The originating case is already a legal case
/// - Allocation or persistence fails
pub fn escalate_case(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    request: EscalateCaseRequest,
    actor: Actor,
    cause: Cause,
) -> Result<EscalateCaseResponse, ApiError> {
    let origin: Case = persistence
        .get_case(&request.case_number)
        .map_err(|e| match e {
            PersistenceError::NotFound(_) => {
                translate_domain_error(DomainError::CaseNotFound(request.case_number.clone()))
            }
            other => internal("Failed to load case", &other),
        })?;

    if origin.category == CaseCategory::Legal {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("escalate_credit_only"),
            message: format!(
                "Case '{}' is already in the legal workflow",
                origin.case_number.value()
            ),
        });
    }

    let allocation: AllocationResult = allocate_case_number(
        persistence,
        clock,
        actor,
        cause,
        &AllocationRequest {
            firm_id: origin.firm_id,
            department_id: origin.department_id,
            escalated: true,
        },
    )
    .map_err(translate_core_error)?;

    let case_number: CaseNumber = allocation.outcome.case_number().clone();
    let legal_case: Case = Case::new(
        case_number.clone(),
        origin.firm_id,
        origin.department_id,
        CaseCategory::Legal,
        true,
        Some(origin.case_number.clone()),
        clock.now_utc().date(),
    );
    let case_id: i64 = persistence
        .insert_case(&legal_case)
        .map_err(|e| internal("Failed to persist case", &e))?;
    let event_id: i64 = persistence
        .persist_audit_event(&allocation.audit_event)
        .map_err(|e| internal("Failed to persist audit event", &e))?;

    info!(
        case_id,
        case_number = case_number.value(),
        origin = origin.case_number.value(),
        "Escalated case"
    );

    Ok(EscalateCaseResponse {
        case_id,
        case_number: case_number.into_value(),
        origin_case_number: origin.case_number.into_value(),
        event_id,
        message: String::from("Case escalated"),
    })
}

/// Creates or replaces a revenue target for a scope and year.
///
/// The previous target, when one exists, is recorded in the audit event;
/// the stored breakdown is replaced in full.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The target request
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The year or amount violates the target policy
/// - The firm or department does not exist
/// - Persistence fails
pub fn set_revenue_target(
    persistence: &mut Persistence,
    request: SetRevenueTargetRequest,
    actor: Actor,
    cause: Cause,
) -> Result<SetRevenueTargetResponse, ApiError> {
    TargetPolicy::default().validate(request.year, request.yearly_target)?;

    let firm_exists: bool = persistence
        .firm_exists(request.firm_id)
        .map_err(|e| internal("Failed to check firm", &e))?;
    if !firm_exists {
        return Err(translate_domain_error(DomainError::FirmNotFound(
            request.firm_id,
        )));
    }

    if let Some(department_id) = request.department_id {
        let department = persistence.get_department(department_id);
        let belongs: bool = match department {
            Ok(department) => department.firm_id() == Some(request.firm_id),
            Err(PersistenceError::NotFound(_)) => false,
            Err(e) => return Err(internal("Failed to load department", &e)),
        };
        if !belongs {
            return Err(translate_domain_error(DomainError::DepartmentNotFound {
                firm_id: request.firm_id,
                department_id,
            }));
        }
    }

    let previous: Option<RevenueTarget> = persistence
        .get_revenue_target(request.year, request.firm_id, request.department_id)
        .map_err(|e| internal("Failed to load previous target", &e))?;

    let plan = plan_revenue_target(
        actor,
        cause,
        request.firm_id,
        request.department_id,
        request.year,
        request.yearly_target,
        previous.as_ref(),
    )
    .map_err(translate_core_error)?;

    let target_id: i64 = persistence
        .upsert_revenue_target(&plan.target)
        .map_err(|e| internal("Failed to upsert target", &e))?;
    let event_id: i64 = persistence
        .persist_audit_event(&plan.audit_event)
        .map_err(|e| internal("Failed to persist audit event", &e))?;

    info!(
        target_id,
        year = request.year,
        firm_id = request.firm_id,
        "Set revenue target"
    );

    Ok(SetRevenueTargetResponse {
        target_id,
        year: request.year,
        yearly_target: request.yearly_target,
        event_id,
        message: String::from("Revenue target set"),
    })
}

/// Loads the revenue target for a scope and year.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `year` - The target year
/// * `firm_id` - The firm's canonical identifier
/// * `department_id` - Optional department scope
///
/// # Errors
///
/// Returns an error if no target exists for the scope or the query fails.
pub fn get_revenue_target(
    persistence: &mut Persistence,
    year: u16,
    firm_id: i64,
    department_id: Option<i64>,
) -> Result<GetRevenueTargetResponse, ApiError> {
    let target: Option<RevenueTarget> = persistence
        .get_revenue_target(year, firm_id, department_id)
        .map_err(|e| internal("Failed to load target", &e))?;

    let target: RevenueTarget = target.ok_or_else(|| {
        let scope: String = match department_id {
            Some(department_id) => format!("firm {firm_id} department {department_id}"),
            None => format!("firm {firm_id} firm-wide"),
        };
        translate_domain_error(DomainError::TargetNotFound { year, scope })
    })?;

    Ok(GetRevenueTargetResponse::from(&target))
}

/// Loads a case by its case number.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `case_number` - The case number to look up
///
/// # Errors
///
/// Returns an error if the case does not exist or the query fails.
pub fn get_case(
    persistence: &mut Persistence,
    case_number: &str,
) -> Result<CaseInfo, ApiError> {
    let case: Case = persistence.get_case(case_number).map_err(|e| match e {
        PersistenceError::NotFound(_) => {
            translate_domain_error(DomainError::CaseNotFound(case_number.to_owned()))
        }
        other => internal("Failed to load case", &other),
    })?;

    Ok(CaseInfo::from(&case))
}
