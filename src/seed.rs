//! Demo sample portfolio: five borrowers, eight facilities and five hand-authored alerts.
//!
//! The store is built fresh on every call so each consumer owns its own copy.

use crate::{
    entities::{Alert, AlertPriority, AlertType, Company, ContactInfo, Loan},
    errors::{Error, Result},
    store::PortfolioStore,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| Error::Config {
        message: format!("invalid seed date {year}-{month:02}-{day:02}"),
    })
}

fn midnight(year: i32, month: u32, day: u32) -> Result<DateTime<Utc>> {
    Ok(date(year, month, day)?.and_time(NaiveTime::MIN).and_utc())
}

struct CompanySeed<'a> {
    id: &'a str,
    name: &'a str,
    industry: &'a str,
    location: &'a str,
    revenue: f64,
    employees: u32,
    website: &'a str,
    contact: [&'a str; 4],
    notes: &'a str,
    created: (i32, u32, u32),
}

impl CompanySeed<'_> {
    fn build(&self) -> Result<Company> {
        let [name, title, email, phone] = self.contact;
        let (y, m, d) = self.created;
        Ok(Company {
            id: self.id.to_string(),
            name: self.name.to_string(),
            industry: self.industry.to_string(),
            location: self.location.to_string(),
            revenue: self.revenue,
            employees: self.employees,
            website: self.website.to_string(),
            contact_info: ContactInfo {
                name: name.to_string(),
                title: title.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
            },
            notes: self.notes.to_string(),
            created_at: midnight(y, m, d)?,
        })
    }
}

struct LoanSeed<'a> {
    id: &'a str,
    company_id: &'a str,
    loan_type: &'a str,
    amount: f64,
    lender: &'a str,
    originated: (i32, u32, u32),
    matures: (i32, u32, u32),
    interest_rate: f64,
    covenants: &'a str,
    alert_sent: bool,
    notes: &'a str,
}

impl LoanSeed<'_> {
    fn build(&self) -> Result<Loan> {
        let (oy, om, od) = self.originated;
        let (my, mm, md) = self.matures;
        Ok(Loan {
            id: self.id.to_string(),
            company_id: self.company_id.to_string(),
            loan_type: self.loan_type.to_string(),
            amount: self.amount,
            currency: "USD".to_string(),
            lender: self.lender.to_string(),
            origination_date: date(oy, om, od)?,
            maturity_date: date(my, mm, md)?,
            interest_rate: self.interest_rate,
            covenants: self.covenants.to_string(),
            covenant_tests: Vec::new(),
            alert_sent: self.alert_sent,
            notes: self.notes.to_string(),
        })
    }
}

fn companies() -> Result<Vec<Company>> {
    [
        CompanySeed {
            id: "1",
            name: "TechFlow Solutions",
            industry: "Technology",
            location: "San Francisco, CA",
            revenue: 125_000_000.0,
            employees: 450,
            website: "https://techflow.com",
            contact: ["Sarah Chen", "CFO", "sarah.chen@techflow.com", "+1 (555) 123-4567"],
            notes: "Growing SaaS company with strong recurring revenue. Excellent relationship.",
            created: (2023, 1, 15),
        },
        CompanySeed {
            id: "2",
            name: "Midwest Manufacturing Co.",
            industry: "Manufacturing",
            location: "Chicago, IL",
            revenue: 280_000_000.0,
            employees: 1200,
            website: "https://midwestmfg.com",
            contact: [
                "John Rodriguez",
                "Treasury Director",
                "j.rodriguez@midwestmfg.com",
                "+1 (555) 987-6543",
            ],
            notes: "Established manufacturer with solid fundamentals. Looking to expand operations.",
            created: (2022, 11, 20),
        },
        CompanySeed {
            id: "3",
            name: "HealthTech Innovations",
            industry: "Healthcare",
            location: "Boston, MA",
            revenue: 65_000_000.0,
            employees: 180,
            website: "https://healthtech-innovations.com",
            contact: [
                "Dr. Emily Watson",
                "CEO",
                "emily.watson@healthtech.com",
                "+1 (555) 456-7890",
            ],
            notes: "Medical device startup with FDA approvals. High growth potential.",
            created: (2023, 3, 10),
        },
        CompanySeed {
            id: "4",
            name: "Premier Retail Group",
            industry: "Retail",
            location: "Atlanta, GA",
            revenue: 340_000_000.0,
            employees: 2800,
            website: "https://premierretail.com",
            contact: [
                "Michael Thompson",
                "VP Finance",
                "m.thompson@premierretail.com",
                "+1 (555) 321-9876",
            ],
            notes: "Multi-location retail chain. Seasonal fluctuations in cash flow.",
            created: (2022, 8, 5),
        },
        CompanySeed {
            id: "5",
            name: "GreenEnergy Solutions",
            industry: "Energy",
            location: "Austin, TX",
            revenue: 180_000_000.0,
            employees: 520,
            website: "https://greenenergy.com",
            contact: ["Lisa Park", "CFO", "lisa.park@greenenergy.com", "+1 (555) 654-3210"],
            notes: "Renewable energy company with government contracts. Strong ESG profile.",
            created: (2023, 2, 28),
        },
    ]
    .iter()
    .map(CompanySeed::build)
    .collect()
}

fn loans() -> Result<Vec<Loan>> {
    [
        LoanSeed {
            id: "1",
            company_id: "1",
            loan_type: "Term Loan",
            amount: 50_000_000.0,
            lender: "First National Bank",
            originated: (2022, 6, 15),
            matures: (2025, 6, 15),
            interest_rate: 5.25,
            covenants: "Debt-to-EBITDA < 3.0x, Min DSCR 1.25x",
            alert_sent: false,
            notes: "Used for product development and market expansion",
        },
        LoanSeed {
            id: "2",
            company_id: "2",
            loan_type: "Revolving Credit",
            amount: 75_000_000.0,
            lender: "Global Capital Bank",
            originated: (2023, 1, 20),
            matures: (2026, 1, 20),
            interest_rate: 4.75,
            covenants: "Working capital maintenance, Asset coverage ratio > 1.5x",
            alert_sent: false,
            notes: "Working capital facility for seasonal inventory needs",
        },
        LoanSeed {
            id: "3",
            company_id: "3",
            loan_type: "Equipment Financing",
            amount: 25_000_000.0,
            lender: "Tech Equipment Finance",
            originated: (2023, 9, 10),
            matures: (2025, 3, 15),
            interest_rate: 6.5,
            covenants: "Equipment maintenance, Insurance requirements",
            alert_sent: true,
            notes: "Financing for new medical equipment and lab setup",
        },
        LoanSeed {
            id: "4",
            company_id: "4",
            loan_type: "Term Loan",
            amount: 120_000_000.0,
            lender: "Retail Finance Corp",
            originated: (2021, 11, 1),
            matures: (2024, 11, 1),
            interest_rate: 4.25,
            covenants: "Store count maintenance, Inventory turnover > 4x",
            alert_sent: true,
            notes: "Store expansion and renovation project funding",
        },
        LoanSeed {
            id: "5",
            company_id: "5",
            loan_type: "Project Finance",
            amount: 200_000_000.0,
            lender: "Green Infrastructure Fund",
            originated: (2022, 4, 12),
            matures: (2027, 4, 12),
            interest_rate: 3.95,
            covenants: "Project completion milestones, Environmental compliance",
            alert_sent: false,
            notes: "Solar farm development project in West Texas",
        },
        LoanSeed {
            id: "6",
            company_id: "1",
            loan_type: "Bridge Loan",
            amount: 30_000_000.0,
            lender: "Quick Capital Partners",
            originated: (2024, 1, 15),
            matures: (2025, 1, 15),
            interest_rate: 7.5,
            covenants: "Refinancing deadline, Cash flow monitoring",
            alert_sent: true,
            notes: "Bridge financing for acquisition pending permanent financing",
        },
        LoanSeed {
            id: "7",
            company_id: "2",
            loan_type: "Term Loan",
            amount: 85_000_000.0,
            lender: "Industrial Development Bank",
            originated: (2023, 7, 20),
            matures: (2025, 7, 20),
            interest_rate: 5.0,
            covenants: "Production targets, Quality certifications",
            alert_sent: false,
            notes: "New manufacturing facility in Mexico",
        },
        LoanSeed {
            id: "8",
            company_id: "3",
            loan_type: "Mezzanine Debt",
            amount: 40_000_000.0,
            lender: "Growth Capital Fund",
            originated: (2023, 12, 5),
            matures: (2025, 2, 28),
            interest_rate: 12.0,
            covenants: "Revenue milestones, Board representation",
            alert_sent: true,
            notes: "Growth capital for R&D and FDA trial expansion",
        },
    ]
    .iter()
    .map(LoanSeed::build)
    .collect()
}

fn alerts() -> Result<Vec<Alert>> {
    let alert = |id: &str,
                 loan_id: &str,
                 company_id: &str,
                 alert_type: AlertType,
                 priority: AlertPriority,
                 message: &str,
                 created: DateTime<Utc>| Alert {
        id: id.to_string(),
        loan_id: loan_id.to_string(),
        company_id: company_id.to_string(),
        alert_type,
        priority,
        message: message.to_string(),
        created_at: created,
        dismissed: false,
        covenant_metric: None,
    };

    Ok(vec![
        alert(
            "1",
            "3",
            "3",
            AlertType::MaturityWarning,
            AlertPriority::High,
            "Equipment financing loan matures in 73 days. Refinancing discussions should begin immediately.",
            midnight(2024, 12, 15)?,
        ),
        alert(
            "2",
            "8",
            "3",
            AlertType::MaturityWarning,
            AlertPriority::Critical,
            "Mezzanine debt matures in 57 days. High interest rate facility needs attention.",
            midnight(2024, 12, 20)?,
        ),
        alert(
            "3",
            "6",
            "1",
            AlertType::MaturityWarning,
            AlertPriority::High,
            "Bridge loan matures in 13 days. Permanent financing must be secured urgently.",
            midnight(2024, 12, 28)?,
        ),
        alert(
            "4",
            "1",
            "1",
            AlertType::MaturityWarning,
            AlertPriority::Medium,
            "Term loan matures in 164 days. Begin refinancing process within next 30 days.",
            midnight(2024, 12, 25)?,
        ),
        alert(
            "5",
            "7",
            "2",
            AlertType::RateReview,
            AlertPriority::Low,
            "Term loan eligible for rate reduction review based on improved credit profile.",
            midnight(2024, 12, 30)?,
        ),
    ])
}

/// Builds a store holding the demo portfolio.
///
/// # Errors
/// Only fails if the embedded seed data is itself inconsistent.
pub fn sample_portfolio() -> Result<PortfolioStore> {
    PortfolioStore::new(companies()?, loans()?, alerts()?)
}
