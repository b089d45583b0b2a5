use actix_web::dev::HttpServiceFactory;
use actix_web::{post, web, HttpResponse, Responder};

use serde::Deserialize;

use sqlx::PgPool;

use uuid::Uuid;

use crate::client::EmailClient;
use crate::error::RestResult;
use crate::issuance::{self, IssueError};
use crate::repo::{PgContributionRepo, PgDonorRepo};
use crate::settings::OrganizationSettings;

#[derive(Debug, Deserialize)]
pub struct IssueBody {
    donor_id: Uuid,
    /// When false the certificate is generated and returned but not emailed
    #[serde(default = "default_deliver")]
    deliver: bool,
}

fn default_deliver() -> bool {
    true
}

#[tracing::instrument(name = "Issue a certificate", skip(pool, email_client, organization))]
#[post("")]
async fn issue(
    body: web::Json<IssueBody>,
    pool: web::Data<PgPool>,
    email_client: web::Data<EmailClient>,
    organization: web::Data<OrganizationSettings>,
) -> RestResult<impl Responder> {
    let donors = PgDonorRepo::new(pool.get_ref().clone());
    let contributions = PgContributionRepo::new(pool.get_ref().clone());

    let report = issuance::issue_certificate(
        &donors,
        &contributions,
        email_client.get_ref(),
        organization.get_ref(),
        body.donor_id,
        body.deliver,
    )
    .await;

    // Partial success (EMAIL_SEND_FAILED) still reports 200; the
    // certificate exists and the caller may resend
    let response = match report.error {
        Some(IssueError::UserNotFound) | Some(IssueError::NoDonationsFound) => {
            HttpResponse::NotFound().json(report)
        }
        Some(IssueError::UnknownError) => HttpResponse::InternalServerError().json(report),
        Some(IssueError::EmailSendFailed) | None => HttpResponse::Ok().json(report),
    };

    Ok(response)
}

/// Certificate API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/certificates").service(issue)
}
