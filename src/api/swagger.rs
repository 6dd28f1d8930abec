use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Utility Bill Service API",
        version = "1.0.0",
        description = "REST backend for tracking utility bills, users, and payments.\n\n**Features:**\n- Bill CRUD with email/category filters and a recent-bills dashboard view\n- User registration with email deduplication\n- Payment recording with best-effort bill status update\n- Health monitoring"
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Users
        crate::api::users::create_user,

        // Bills
        crate::api::bills::list_bills,
        crate::api::bills::recent_bills,
        crate::api::bills::get_bill,
        crate::api::bills::create_bill,

        // Payments
        crate::api::payments::create_payment,
        crate::api::payments::list_payments,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints for monitoring service status."),
        (name = "Users", description = "User registration. Creation is idempotent per email via an application-level existence check."),
        (name = "Bills", description = "Utility bill CRUD. Lists support email and category filters; /recent-bills returns the newest bills by date."),
        (name = "Payments", description = "Payment recording and maintenance. Recording a payment with a billId marks that bill Paid, best-effort."),
    )
)]
pub struct ApiDoc;
