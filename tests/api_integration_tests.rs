//! End-to-end API tests over the full router: employee and salary CRUD,
//! company settings, logo upload and document generation.

use anyhow::Result;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{admin_token, setup_test_app, setup_test_app_with_config, test_config};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn authed_json(token: &str, method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token))
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_get(token: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn create_employee(app: &Router, token: &str, cin: &str) -> Value {
    let response = app
        .clone()
        .oneshot(authed_json(
            token,
            "POST",
            "/employees",
            json!({
                "nom": "Ben Ali",
                "prenom": "Sami",
                "cin": cin,
                "type_contrat": "CDI",
                "poste": "Dev",
                "date_embauche": "2024-01-10"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn employee_crud_over_http() -> Result<()> {
    let (state, app) = setup_test_app().await?;
    let token = admin_token(&state);

    // Create: the code is generated server-side even if the client sends one
    let response = app
        .clone()
        .oneshot(authed_json(
            &token,
            "POST",
            "/employees",
            json!({
                "code": "TEMP",
                "nom": "Ben Ali",
                "prenom": "Sami",
                "cin": "X123",
                "type_contrat": "CDI",
                "service": "IT",
                "poste": "Dev",
                "date_embauche": "2024-01-10"
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(
        response
            .headers()
            .get("Location")
            .unwrap()
            .to_str()?
            .starts_with("/employees/")
    );
    let created = body_json(response).await;
    assert_eq!(created["code"], "EMP0001");
    let id = created["id"].as_str().unwrap().to_string();

    // Read back
    let response = app
        .clone()
        .oneshot(authed_get(&token, &format!("/employees/{}", id)))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    // Update
    let response = app
        .clone()
        .oneshot(authed_json(
            &token,
            "PUT",
            &format!("/employees/{}", id),
            json!({
                "nom": "Ben Ali",
                "prenom": "Sami",
                "cin": "X123",
                "type_contrat": "CDD",
                "poste": "Lead Dev",
                "date_embauche": "2024-01-10"
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["type_contrat"], "CDD");
    assert_eq!(updated["poste"], "Lead Dev");
    assert_eq!(updated["code"], "EMP0001");

    // List
    let response = app.clone().oneshot(authed_get(&token, "/employees")).await?;
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Delete
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/employees/{}", id))
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone
    let response = app
        .oneshot(authed_get(&token, &format!("/employees/{}", id)))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn spec_scenario_employee_then_salary() -> Result<()> {
    let (state, app) = setup_test_app().await?;
    let token = admin_token(&state);

    // Create employee -> response includes a generated code
    let employee = create_employee(&app, &token, "X123").await;
    let code = employee["code"].as_str().unwrap();
    assert!(code.starts_with("EMP"));
    let employee_id = employee["id"].as_str().unwrap();

    // A second employee gets a distinct code
    let other = create_employee(&app, &token, "X124").await;
    assert_ne!(other["code"], employee["code"]);

    // Create salary 2024-01: 1500 + 100 -> net 1600
    let response = app
        .clone()
        .oneshot(authed_json(
            &token,
            "POST",
            "/salaries",
            json!({
                "employee_id": employee_id,
                "year": 2024,
                "month": 1,
                "salaire": 1500.0,
                "prime": 100.0
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let salary = body_json(response).await;
    assert_eq!(salary["net"], 1600.0);

    // Re-creating the same period fails with a conflict
    let response = app
        .clone()
        .oneshot(authed_json(
            &token,
            "POST",
            "/salaries",
            json!({
                "employee_id": employee_id,
                "year": 2024,
                "month": 1,
                "salaire": 1500.0,
                "prime": 100.0
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error = body_json(response).await;
    assert_eq!(error["code"], "CONFLICT");

    Ok(())
}

#[tokio::test]
async fn salary_list_embeds_employee_and_net() -> Result<()> {
    let (state, app) = setup_test_app().await?;
    let token = admin_token(&state);

    let employee = create_employee(&app, &token, "L001").await;
    let employee_id = employee["id"].as_str().unwrap();

    // 2600 salary, 2 absence days (-200), 100 advance -> net 2300
    let response = app
        .clone()
        .oneshot(authed_json(
            &token,
            "POST",
            "/salaries",
            json!({
                "employee_id": employee_id,
                "year": 2024,
                "month": 2,
                "salaire": 2600.0,
                "prime": 0.0,
                "absence": 2.0,
                "avance": 100.0,
                "date_avance": "2024-02-10"
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(authed_get(&token, "/salaries?year=2024&month=2"))
        .await?;
    let list = body_json(response).await;
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["employee"]["code"], employee["code"]);
    assert!((rows[0]["net"].as_f64().unwrap() - 2300.0).abs() < 1e-9);

    // Filter that matches nothing
    let response = app
        .oneshot(authed_get(&token, "/salaries?year=2019"))
        .await?;
    let list = body_json(response).await;
    assert!(list.as_array().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn company_settings_round_trip() -> Result<()> {
    let (state, app) = setup_test_app().await?;
    let token = admin_token(&state);

    // No company yet -> null
    let response = app.clone().oneshot(authed_get(&token, "/company")).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, Value::Null);

    // First save
    let response = app
        .clone()
        .oneshot(authed_json(
            &token,
            "POST",
            "/company",
            json!({
                "nom": "Société Exemple",
                "ville": "Tunis",
                "cnss_employeur": "123456-78"
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let saved = body_json(response).await;

    // Second save updates in place
    let response = app
        .clone()
        .oneshot(authed_json(
            &token,
            "POST",
            "/company",
            json!({"nom": "Société Exemple SARL"}),
        ))
        .await?;
    let resaved = body_json(response).await;
    assert_eq!(resaved["id"], saved["id"]);
    assert_eq!(resaved["nom"], "Société Exemple SARL");

    // Missing name -> validation error
    let response = app
        .oneshot(authed_json(&token, "POST", "/company", json!({"nom": ""})))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

fn multipart_request(
    token: &str,
    filename: &str,
    content_type: &str,
    payload: &[u8],
) -> Request<Body> {
    let boundary = "paie-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header("Authorization", format!("Bearer {}", token))
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn logo_upload_accepts_images_and_rejects_the_rest() -> Result<()> {
    let upload_dir = tempfile::tempdir()?;
    let mut config = test_config();
    config.upload_dir = upload_dir.path().to_string_lossy().into_owned();
    config.max_logo_bytes = 1024;

    let (state, app) = setup_test_app_with_config(config).await?;
    let token = admin_token(&state);

    // A small image is accepted and a public URL comes back
    let response = app
        .clone()
        .oneshot(multipart_request(
            &token,
            "logo.png",
            "image/png",
            b"fake-png-bytes",
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let url = body["publicUrl"].as_str().unwrap();
    assert!(url.starts_with("/uploads/logo-"));

    // Non-image content type is rejected before any write
    let response = app
        .clone()
        .oneshot(multipart_request(
            &token,
            "notes.pdf",
            "application/pdf",
            b"%PDF-1.4",
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Oversized image is rejected too
    let oversized = vec![0u8; 2048];
    let response = app
        .oneshot(multipart_request(
            &token,
            "logo.png",
            "image/png",
            &oversized,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Exactly one file was written
    assert_eq!(std::fs::read_dir(upload_dir.path())?.count(), 1);

    Ok(())
}

#[tokio::test]
async fn payslip_generation_returns_attachment() -> Result<()> {
    let (state, app) = setup_test_app().await?;
    let token = admin_token(&state);

    let employee = create_employee(&app, &token, "P001").await;
    let employee_id = employee["id"].as_str().unwrap();
    let code = employee["code"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(authed_json(
            &token,
            "POST",
            "/salaries",
            json!({
                "employee_id": employee_id,
                "year": 2024,
                "month": 1,
                "salaire": 1500.0,
                "prime": 100.0
            }),
        ))
        .await?;
    let salary = body_json(response).await;
    let salary_id = salary["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(authed_json(
            &token,
            "POST",
            "/generate-payslip",
            json!({"salaryId": salary_id}),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/html; charset=utf-8"
    );
    assert_eq!(
        response.headers().get("content-disposition").unwrap(),
        &format!("attachment; filename=\"bulletin-{}-2024-01.html\"", code)
    );

    let html = body_text(response).await;
    assert!(html.contains("Bulletin de Paie"));
    assert!(html.contains("Janvier 2024"));
    assert!(html.contains("1\u{00A0}600,00 TND"));

    // Unknown salary id -> 404
    let response = app
        .oneshot(authed_json(
            &token,
            "POST",
            "/generate-payslip",
            json!({"salaryId": uuid::Uuid::new_v4()}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn certificates_check_contract_type() -> Result<()> {
    let (state, app) = setup_test_app().await?;
    let token = admin_token(&state);

    // A CDI employee gets a work certificate
    let employee = create_employee(&app, &token, "C100").await;
    let employee_id = employee["id"].as_str().unwrap();
    let code = employee["code"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(authed_json(
            &token,
            "POST",
            "/generate-work-certificate",
            json!({"employeeId": employee_id}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-disposition").unwrap(),
        &format!("attachment; filename=\"attestation-travail-{}.html\"", code)
    );
    let html = body_text(response).await;
    assert!(html.contains("Attestation de Travail"));

    // ...but not an internship certificate
    let response = app
        .clone()
        .oneshot(authed_json(
            &token,
            "POST",
            "/generate-internship-certificate",
            json!({"employeeId": employee_id}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // An intern does
    let response = app
        .clone()
        .oneshot(authed_json(
            &token,
            "POST",
            "/employees",
            json!({
                "nom": "Gharbi",
                "prenom": "Lina",
                "cin": "C101",
                "type_contrat": "STAGE",
                "poste": "Stagiaire Dev",
                "date_embauche": "2025-02-01"
            }),
        ))
        .await?;
    let intern = body_json(response).await;
    let intern_id = intern["id"].as_str().unwrap();

    let response = app
        .oneshot(authed_json(
            &token,
            "POST",
            "/generate-internship-certificate",
            json!({"employeeId": intern_id}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Attestation de Stage"));

    Ok(())
}
