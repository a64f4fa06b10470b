//! Payslip ("Bulletin de Paie") HTML rendering.
//!
//! The layout is a fixed template: company header, employee information
//! grid, gross salary table, deductions and the net-à-payer box. Returned
//! to the client as a downloadable attachment.

use chrono::Utc;

use crate::models::company::Model as CompanyModel;
use crate::models::employee::Model as EmployeeModel;
use crate::models::salary::Model as SalaryModel;

use super::{
    absence_adjustment, escape_html, format_currency, format_date_fr, month_name, net_pay,
};

/// Deterministic attachment filename for a payslip
pub fn payslip_filename(code: &str, year: i32, month: i32) -> String {
    format!("bulletin-{}-{}-{:02}.html", code, year, month)
}

/// Render the payslip document for a salary entry.
///
/// The company profile is optional; missing fields degrade to the generic
/// "Entreprise" header exactly like the original documents did.
pub fn render_payslip(
    company: Option<&CompanyModel>,
    employee: &EmployeeModel,
    salary: &SalaryModel,
) -> String {
    let brut = salary.salaire + salary.prime;
    let retenue_absence = absence_adjustment(salary.salaire, salary.absence);
    let net = net_pay(salary.salaire, salary.prime, salary.absence, salary.avance);

    let logo = company
        .and_then(|c| c.logo_url.as_deref())
        .map(|url| {
            format!(
                r#"<img src="{}" alt="Logo" class="logo" />"#,
                escape_html(url)
            )
        })
        .unwrap_or_default();
    let company_nom = escape_html(company.map(|c| c.nom.as_str()).unwrap_or("Entreprise"));
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

    let prime_row = if salary.prime > 0.0 {
        format!(
            r#"      <tr>
        <td>Prime</td>
        <td class="amount">{}</td>
      </tr>
"#,
            format_currency(salary.prime)
        )
    } else {
        String::new()
    };

    let mut deduction_rows = String::new();
    if retenue_absence > 0.0 {
        deduction_rows.push_str(&format!(
            r#"      <tr>
        <td>Retenue absence ({} j)</td>
        <td class="amount">-{}</td>
      </tr>
"#,
            salary.absence,
            format_currency(retenue_absence)
        ));
    }
    if salary.avance > 0.0 {
        let date_avance = salary
            .date_avance
            .map(|d| format!(" du {}", format_date_fr(d)))
            .unwrap_or_default();
        deduction_rows.push_str(&format!(
            r#"      <tr>
        <td>Avance{}</td>
        <td class="amount">-{}</td>
      </tr>
"#,
            date_avance,
            format_currency(salary.avance)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="UTF-8">
  <style>
    * {{ margin: 0; padding: 0; box-sizing: border-box; }}
    body {{
      font-family: Arial, sans-serif;
      padding: 40px;
      max-width: 800px;
      margin: 0 auto;
      color: #333;
    }}
    .header {{
      margin-bottom: 40px;
      padding-bottom: 20px;
      border-bottom: 3px solid #e48f13;
    }}
    .company-info h1 {{ color: #e48f13; font-size: 24px; margin-bottom: 10px; }}
    .company-info p {{ color: #666; font-size: 14px; line-height: 1.5; }}
    .logo {{ max-width: 120px; max-height: 80px; }}
    .title {{ text-align: center; margin: 30px 0; }}
    .title h2 {{
      color: #1a1a2e;
      font-size: 22px;
      text-transform: uppercase;
      letter-spacing: 2px;
    }}
    .title p {{ color: #e48f13; font-size: 16px; margin-top: 8px; font-weight: bold; }}
    .section {{ margin: 25px 0; padding: 20px; background: #f8f9fa; border-radius: 8px; }}
    .section h3 {{
      color: #e48f13;
      font-size: 14px;
      text-transform: uppercase;
      letter-spacing: 1px;
      margin-bottom: 15px;
      padding-bottom: 10px;
      border-bottom: 1px solid #ddd;
    }}
    .info-grid {{ display: grid; grid-template-columns: 1fr 1fr; gap: 10px; }}
    .info-item {{ display: flex; }}
    .info-label {{ color: #666; font-size: 13px; min-width: 120px; }}
    .info-value {{ color: #333; font-size: 13px; font-weight: 500; }}
    .salary-table {{ width: 100%; border-collapse: collapse; margin: 20px 0; }}
    .salary-table th {{
      background: #1a1a2e;
      color: white;
      padding: 12px;
      text-align: left;
      font-size: 13px;
    }}
    .salary-table td {{ padding: 12px; border-bottom: 1px solid #eee; font-size: 13px; }}
    .salary-table tr:last-child td {{ border-bottom: none; }}
    .salary-table .amount {{ text-align: right; font-family: monospace; }}
    .total-box {{
      background: linear-gradient(135deg, #e48f13, #f5a623);
      color: white;
      padding: 25px;
      border-radius: 8px;
      text-align: center;
      margin-top: 30px;
    }}
    .total-box .label {{ font-size: 14px; text-transform: uppercase; letter-spacing: 2px; }}
    .total-box .amount {{ font-size: 32px; font-weight: bold; margin-top: 10px; }}
    .footer {{
      margin-top: 50px;
      padding-top: 20px;
      border-top: 1px solid #ddd;
      display: flex;
      justify-content: space-between;
      font-size: 12px;
      color: #666;
    }}
    .signature {{ text-align: right; }}
    .signature-line {{
      width: 200px;
      border-top: 1px solid #333;
      margin-top: 50px;
      margin-left: auto;
    }}
    @media print {{ body {{ padding: 20px; }} }}
  </style>
</head>
<body>
  <div class="header">
    <div class="company-info">
      {logo}
      <h1>{company_nom}</h1>
      <p>{company_adresse}<br>{company_ville}</p>
      {company_cnss}
    </div>
  </div>

  <div class="title">
    <h2>Bulletin de Paie</h2>
    <p>{month} {year}</p>
  </div>

  <div class="section">
    <h3>Informations Employé</h3>
    <div class="info-grid">
      <div class="info-item">
        <span class="info-label">Code Employé:</span>
        <span class="info-value">{code}</span>
      </div>
      <div class="info-item">
        <span class="info-label">CIN:</span>
        <span class="info-value">{cin}</span>
      </div>
      <div class="info-item">
        <span class="info-label">Nom &amp; Prénom:</span>
        <span class="info-value">{nom} {prenom}</span>
      </div>
      <div class="info-item">
        <span class="info-label">Type Contrat:</span>
        <span class="info-value">{type_contrat}</span>
      </div>
      <div class="info-item">
        <span class="info-label">Poste:</span>
        <span class="info-value">{poste}</span>
      </div>
      <div class="info-item">
        <span class="info-label">Service:</span>
        <span class="info-value">{service}</span>
      </div>
      <div class="info-item">
        <span class="info-label">Date d'embauche:</span>
        <span class="info-value">{date_embauche}</span>
      </div>
    </div>
  </div>

  <table class="salary-table">
    <thead>
      <tr>
        <th>Désignation</th>
        <th style="text-align: right;">Montant</th>
      </tr>
    </thead>
    <tbody>
      <tr>
        <td>Salaire de base</td>
        <td class="amount">{salaire}</td>
      </tr>
{prime_row}      <tr style="font-weight: bold; background: #f0f0f0;">
        <td>Total Brut</td>
        <td class="amount">{brut}</td>
      </tr>
{deduction_rows}    </tbody>
  </table>

  <div class="total-box">
    <div class="label">Net à Payer</div>
    <div class="amount">{net}</div>
  </div>

  <div class="footer">
    <div>
      <p>Document généré le {generated}</p>
    </div>
    <div class="signature">
      <p>Signature et cachet</p>
      <div class="signature-line"></div>
    </div>
  </div>
</body>
</html>
"#,
        logo = logo,
        company_nom = company_nom,
        company_adresse = company_adresse,
        company_ville = company_ville,
        company_cnss = company_cnss,
        month = month_name(salary.month),
        year = salary.year,
        code = escape_html(&employee.code),
        cin = escape_html(&employee.cin),
        nom = escape_html(&employee.nom),
        prenom = escape_html(&employee.prenom),
        type_contrat = employee.type_contrat.as_str(),
        poste = escape_html(&employee.poste),
        service = escape_html(employee.service.as_deref().unwrap_or("-")),
        date_embauche = format_date_fr(employee.date_embauche),
        salaire = format_currency(salary.salaire),
        prime_row = prime_row,
        brut = format_currency(brut),
        deduction_rows = deduction_rows,
        net = format_currency(net),
        generated = format_date_fr(Utc::now().date_naive()),
    )
}
