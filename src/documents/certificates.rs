//! Attestation HTML rendering: attestation de travail and attestation de
//! stage. Both share the same sober letter layout with the company header
//! and a signature block.

use chrono::Utc;

use crate::models::company::Model as CompanyModel;
use crate::models::employee::Model as EmployeeModel;

use super::{escape_html, format_date_fr};

/// Deterministic attachment filename for a work certificate
pub fn work_certificate_filename(code: &str) -> String {
    format!("attestation-travail-{}.html", code)
}

/// Deterministic attachment filename for an internship certificate
pub fn internship_certificate_filename(code: &str) -> String {
    format!("attestation-stage-{}.html", code)
}

/// Render an attestation de travail for an employee.
pub fn render_work_certificate(
    company: Option<&CompanyModel>,
    employee: &EmployeeModel,
) -> String {
    let body = format!(
        "Nous soussignés, <strong>{nom_societe}</strong>, attestons par la présente que \
         <strong>{prenom} {nom}</strong>, titulaire de la CIN n° <strong>{cin}</strong>, \
         est employé(e) au sein de notre société en qualité de <strong>{poste}</strong> \
         depuis le <strong>{date_embauche}</strong>, sous contrat {type_contrat}.",
        nom_societe = company_name(company),
        prenom = escape_html(&employee.prenom),
        nom = escape_html(&employee.nom),
        cin = escape_html(&employee.cin),
        poste = escape_html(&employee.poste),
        date_embauche = format_date_fr(employee.date_embauche),
        type_contrat = employee.type_contrat.as_str(),
    );

    render_letter(company, "Attestation de Travail", &body)
}

/// Render an attestation de stage for an intern.
pub fn render_internship_certificate(
    company: Option<&CompanyModel>,
    employee: &EmployeeModel,
) -> String {
    let body = format!(
        "Nous soussignés, <strong>{nom_societe}</strong>, attestons par la présente que \
         <strong>{prenom} {nom}</strong>, titulaire de la CIN n° <strong>{cin}</strong>, \
         effectue un stage au sein de notre société en qualité de \
         <strong>{poste}</strong> depuis le <strong>{date_embauche}</strong>.",
        nom_societe = company_name(company),
        prenom = escape_html(&employee.prenom),
        nom = escape_html(&employee.nom),
        cin = escape_html(&employee.cin),
        poste = escape_html(&employee.poste),
        date_embauche = format_date_fr(employee.date_embauche),
    );

    render_letter(company, "Attestation de Stage", &body)
}

fn company_name(company: Option<&CompanyModel>) -> String {
    escape_html(company.map(|c| c.nom.as_str()).unwrap_or("Entreprise"))
}

fn render_letter(company: Option<&CompanyModel>, title: &str, body: &str) -> String {
    let company_nom = company_name(company);
    let company_adresse = escape_html(
        company
            .and_then(|c| c.adresse.as_deref())
            .unwrap_or_default(),
    );
    let company_ville = escape_html(company.and_then(|c| c.ville.as_deref()).unwrap_or_default());
    let company_cnss = company
        .and_then(|c| c.cnss_employeur.as_deref())
        .map(|cnss| format!("<p>CNSS: {}</p>", escape_html(cnss)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="UTF-8">
  <style>
    * {{ margin: 0; padding: 0; box-sizing: border-box; }}
    body {{
      font-family: Arial, sans-serif;
      padding: 50px;
      max-width: 800px;
      margin: 0 auto;
      color: #333;
      line-height: 1.8;
    }}
    .header {{
      margin-bottom: 50px;
      padding-bottom: 20px;
      border-bottom: 3px solid #e48f13;
    }}
    .header h1 {{ color: #e48f13; font-size: 24px; margin-bottom: 10px; }}
    .header p {{ color: #666; font-size: 14px; line-height: 1.5; }}
    .title {{
      text-align: center;
      margin: 40px 0;
      color: #1a1a2e;
      font-size: 22px;
      text-transform: uppercase;
      letter-spacing: 2px;
    }}
    .body {{ font-size: 15px; text-align: justify; margin: 40px 0; }}
    .closing {{ font-size: 15px; margin-top: 30px; }}
    .footer {{
      margin-top: 80px;
      display: flex;
      justify-content: space-between;
      font-size: 13px;
      color: #666;
    }}
    .signature {{ text-align: right; }}
    .signature-line {{
      width: 200px;
      border-top: 1px solid #333;
      margin-top: 60px;
      margin-left: auto;
    }}
    @media print {{ body {{ padding: 30px; }} }}
  </style>
</head>
<body>
  <div class="header">
    <h1>{company_nom}</h1>
    <p>{company_adresse}<br>{company_ville}</p>
    {company_cnss}
  </div>

  <h2 class="title">{title}</h2>

  <p class="body">{body}</p>

  <p class="closing">
    La présente attestation est délivrée à l'intéressé(e) pour servir et
    valoir ce que de droit.
  </p>

  <div class="footer">
    <div>
      <p>Fait le {generated}</p>
    </div>
    <div class="signature">
      <p>Signature et cachet</p>
      <div class="signature-line"></div>
    </div>
  </div>
</body>
</html>
"#,
        company_nom = company_nom,
        company_adresse = company_adresse,
        company_ville = company_ville,
        company_cnss = company_cnss,
        title = title,
        body = body,
        generated = format_date_fr(Utc::now().date_naive()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employee::ContractType;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn employee(contract: ContractType) -> EmployeeModel {
        EmployeeModel {
            id: Uuid::new_v4(),
            code: "EMP0003".to_string(),
            nom: "Trabelsi".to_string(),
            prenom: "Anis".to_string(),
            cin: "Y456".to_string(),
            type_contrat: contract,
            service: None,
            poste: "Comptable".to_string(),
            date_embauche: NaiveDate::from_ymd_opt(2023, 3, 15).unwrap(),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[test]
    fn filenames_use_employee_code() {
        assert_eq!(
            work_certificate_filename("EMP0003"),
            "attestation-travail-EMP0003.html"
        );
        assert_eq!(
            internship_certificate_filename("EMP0003"),
            "attestation-stage-EMP0003.html"
        );
    }

    #[test]
    fn work_certificate_embeds_employee_details() {
        let html = render_work_certificate(None, &employee(ContractType::Cdi));

        assert!(html.contains("Attestation de Travail"));
        assert!(html.contains("Anis"));
        assert!(html.contains("Trabelsi"));
        assert!(html.contains("Y456"));
        assert!(html.contains("Comptable"));
        assert!(html.contains("15 mars 2023"));
        assert!(html.contains("CDI"));
    }

    #[test]
    fn internship_certificate_has_its_own_title() {
        let html = render_internship_certificate(None, &employee(ContractType::Stage));

        assert!(html.contains("Attestation de Stage"));
        assert!(html.contains("effectue un stage"));
    }
}
