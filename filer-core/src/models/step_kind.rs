//! Closed identifiers for wizard steps and sub-steps.
//!
//! The presentation layer maps [`StepKind`] to an icon and [`SubStepKind`] to
//! a form; the core only ever carries these enum values.

use serde::{Deserialize, Serialize};

use super::field::{FieldKind, FieldSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    PersonalInfo,
    Income,
    TaxCredit,
    TaxDeducted,
    Wealth,
    Expense,
    Summary,
    Submission,
}

impl StepKind {
    pub const ALL: [StepKind; 8] = [
        Self::PersonalInfo,
        Self::Income,
        Self::TaxCredit,
        Self::TaxDeducted,
        Self::Wealth,
        Self::Expense,
        Self::Summary,
        Self::Submission,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "personal-info",
            Self::Income => "income",
            Self::TaxCredit => "tax-credit",
            Self::TaxDeducted => "tax-deducted",
            Self::Wealth => "wealth",
            Self::Expense => "expense",
            Self::Summary => "summary",
            Self::Submission => "submission",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Information",
            Self::Income => "Income Categories",
            Self::TaxCredit => "Tax Credit",
            Self::TaxDeducted => "Tax Deducted",
            Self::Wealth => "Wealth Statement",
            Self::Expense => "Expense",
            Self::Summary => "Summary",
            Self::Submission => "FBR Submission",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "Basic details about you",
            Self::Income => "All sources of income",
            Self::TaxCredit => "Applicable tax credits",
            Self::TaxDeducted => "Tax already deducted at source",
            Self::Wealth => "Assets and liabilities",
            Self::Expense => "Your annual expenses",
            Self::Summary => "Review all information",
            Self::Submission => "Submit to FBR/IRIS",
        }
    }

    /// Sub-steps of this step, in wizard order.
    pub fn sub_steps(&self) -> &'static [SubStepKind] {
        use SubStepKind::*;
        match self {
            Self::PersonalInfo => &[BasicInfo],
            Self::Income => &[
                Salary,
                Pension,
                Agriculture,
                Commission,
                RentProperty,
                ProfitSavings,
                Dividend,
                Bonus,
                OtherIncome,
            ],
            Self::TaxCredit => &[UserCredits],
            Self::TaxDeducted => &[BankDeduction, VehicleTax, Utilities, OtherDeductions],
            Self::Wealth => &[
                NetWorth,
                Property,
                Vehicles,
                BankAccounts,
                Insurance,
                OtherAssets,
                CashBalance,
                ForeignAssets,
                Possessions,
                BankLoan,
                OtherLiabilities,
            ],
            Self::Expense => &[ExpenseInfo],
            Self::Summary => &[
                PersonalSummary,
                IncomeSummary,
                CreditSummary,
                DeductedSummary,
                WealthSummary,
                ExpenseSummary,
            ],
            Self::Submission => &[FbrLogin],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubStepKind {
    BasicInfo,
    Salary,
    Pension,
    Agriculture,
    Commission,
    RentProperty,
    ProfitSavings,
    Dividend,
    Bonus,
    OtherIncome,
    UserCredits,
    BankDeduction,
    VehicleTax,
    Utilities,
    OtherDeductions,
    NetWorth,
    Property,
    Vehicles,
    BankAccounts,
    Insurance,
    OtherAssets,
    CashBalance,
    ForeignAssets,
    Possessions,
    BankLoan,
    OtherLiabilities,
    ExpenseInfo,
    PersonalSummary,
    IncomeSummary,
    CreditSummary,
    DeductedSummary,
    WealthSummary,
    ExpenseSummary,
    FbrLogin,
}

use FieldKind::{Date, Email, Number, Password, Phone, Text};

const DEFAULT_FIELDS: &[FieldSpec] =
    &[FieldSpec::new("notes", "Additional Notes", Text)];

const BASIC_INFO: &[FieldSpec] = &[
    FieldSpec::new("fullName", "Full Name (as per CNIC)", Text).required(),
    FieldSpec::new("cnic", "CNIC Number", Text)
        .required()
        .hint("Format: 00000-0000000-0"),
    FieldSpec::new("ntn", "NTN Number", Text),
    FieldSpec::new("dateOfBirth", "Date of Birth", Date).required(),
    FieldSpec::new("fatherName", "Father's Name", Text).required(),
    FieldSpec::new("email", "Email Address", Email).required(),
    FieldSpec::new("phone", "Mobile Number", Phone).required(),
    FieldSpec::new("address", "Residential Address", Text).required(),
    FieldSpec::new("city", "City", Text).required(),
];

const SALARY: &[FieldSpec] = &[
    FieldSpec::new("employerName", "Employer Name", Text),
    FieldSpec::new("annualSalary", "Annual Gross Salary (PKR)", Number)
        .hint("Total salary before deductions"),
    FieldSpec::new("taxDeducted", "Tax Deducted by Employer (PKR)", Number),
    FieldSpec::new("bonusReceived", "Bonus Received (PKR)", Number),
];

const PENSION: &[FieldSpec] = &[
    FieldSpec::new("pensionSource", "Pension Source", Text),
    FieldSpec::new("annualPension", "Annual Pension Amount (PKR)", Number),
    FieldSpec::new("taxDeducted", "Tax Deducted (PKR)", Number),
];

const AGRICULTURE: &[FieldSpec] = &[
    FieldSpec::new("landArea", "Agricultural Land Area (Acres)", Number),
    FieldSpec::new("incomeAmount", "Agricultural Income (PKR)", Number),
    FieldSpec::new("location", "Land Location", Text),
];

const COMMISSION: &[FieldSpec] = &[
    FieldSpec::new("serviceType", "Type of Service/Commission", Text),
    FieldSpec::new("grossAmount", "Gross Commission/Service Income (PKR)", Number),
    FieldSpec::new("expenses", "Related Expenses (PKR)", Number),
];

const RENT_PROPERTY: &[FieldSpec] = &[
    FieldSpec::new("propertyAddress", "Property Address", Text),
    FieldSpec::new("monthlyRent", "Monthly Rent Received (PKR)", Number),
    FieldSpec::new("annualRent", "Annual Rent Income (PKR)", Number),
    FieldSpec::new("propertyTax", "Property Tax Paid (PKR)", Number),
];

const PROFIT_SAVINGS: &[FieldSpec] = &[
    FieldSpec::new("bankName", "Bank Name", Text),
    FieldSpec::new("profitAmount", "Annual Profit on Deposits (PKR)", Number),
    FieldSpec::new("withholdingTax", "Withholding Tax Deducted (PKR)", Number),
];

const DIVIDEND: &[FieldSpec] = &[
    FieldSpec::new("companyName", "Company/Fund Name", Text),
    FieldSpec::new("dividendAmount", "Dividend/Capital Gain (PKR)", Number),
    FieldSpec::new("taxDeducted", "Tax Deducted at Source (PKR)", Number),
];

const BONUS: &[FieldSpec] = &[
    FieldSpec::new("bonusType", "Bonus Type", Text),
    FieldSpec::new("bonusAmount", "Bonus Amount (PKR)", Number),
];

const OTHER_INCOME: &[FieldSpec] = &[
    FieldSpec::new("incomeSource", "Income Source", Text),
    FieldSpec::new("incomeAmount", "Income Amount (PKR)", Number),
];

const USER_CREDITS: &[FieldSpec] = &[
    FieldSpec::new("charitableDonation", "Charitable Donations (PKR)", Number)
        .hint("Donations to approved institutions"),
    FieldSpec::new("investmentInShares", "Investment in Shares (PKR)", Number),
    FieldSpec::new("healthInsurance", "Health Insurance Premium (PKR)", Number),
    FieldSpec::new("pensionContribution", "Voluntary Pension Contribution (PKR)", Number),
];

const BANK_DEDUCTION: &[FieldSpec] = &[
    FieldSpec::new("bankName", "Bank Name", Text),
    FieldSpec::new("withholdingTax", "Withholding Tax on Transactions (PKR)", Number),
    FieldSpec::new("profitTax", "Tax on Bank Profit (PKR)", Number),
];

const VEHICLE_TAX: &[FieldSpec] = &[
    FieldSpec::new("vehicleType", "Vehicle Type", Text),
    FieldSpec::new("registrationNumber", "Registration Number", Text),
    FieldSpec::new("tokenTax", "Token Tax Paid (PKR)", Number),
];

const UTILITIES: &[FieldSpec] = &[
    FieldSpec::new("electricityTax", "Electricity Bill Tax (PKR)", Number),
    FieldSpec::new("gasTax", "Gas Bill Tax (PKR)", Number),
    FieldSpec::new("phoneTax", "Phone Bill Tax (PKR)", Number),
];

const OTHER_DEDUCTIONS: &[FieldSpec] = &[
    FieldSpec::new("description", "Description", Text),
    FieldSpec::new("amount", "Amount (PKR)", Number),
];

const NET_WORTH: &[FieldSpec] = &[
    FieldSpec::new("openingNetWorth", "Opening Net Worth (PKR)", Number)
        .hint("Your wealth at the beginning of tax year"),
    FieldSpec::new("closingNetWorth", "Closing Net Worth (PKR)", Number),
];

const PROPERTY: &[FieldSpec] = &[
    FieldSpec::new("propertyType", "Property Type", Text),
    FieldSpec::new("propertyAddress", "Property Address", Text),
    FieldSpec::new("purchaseValue", "Purchase Value (PKR)", Number),
    FieldSpec::new("currentValue", "Current Market Value (PKR)", Number),
];

const VEHICLES: &[FieldSpec] = &[
    FieldSpec::new("vehicleMake", "Vehicle Make/Model", Text),
    FieldSpec::new("yearOfPurchase", "Year of Purchase", Number),
    FieldSpec::new("purchasePrice", "Purchase Price (PKR)", Number),
    FieldSpec::new("currentValue", "Current Value (PKR)", Number),
];

const BANK_ACCOUNTS: &[FieldSpec] = &[
    FieldSpec::new("bankName", "Bank Name", Text),
    FieldSpec::new("accountType", "Account Type", Text),
    FieldSpec::new("closingBalance", "Closing Balance (PKR)", Number),
];

const INSURANCE: &[FieldSpec] = &[
    FieldSpec::new("insuranceType", "Insurance Type", Text),
    FieldSpec::new("provider", "Insurance Provider", Text),
    FieldSpec::new("sumAssured", "Sum Assured (PKR)", Number),
    FieldSpec::new("surrenderValue", "Current Surrender Value (PKR)", Number),
];

const OTHER_ASSETS: &[FieldSpec] = &[
    FieldSpec::new("assetDescription", "Asset Description", Text),
    FieldSpec::new("assetValue", "Estimated Value (PKR)", Number),
];

const CASH_BALANCE: &[FieldSpec] = &[
    FieldSpec::new("cashInHand", "Cash in Hand (PKR)", Number),
    FieldSpec::new("cashAtBank", "Cash at Bank (PKR)", Number),
];

const FOREIGN_ASSETS: &[FieldSpec] = &[
    FieldSpec::new("assetType", "Foreign Asset Type", Text),
    FieldSpec::new("country", "Country", Text),
    FieldSpec::new("valuePKR", "Value in PKR", Number),
];

const POSSESSIONS: &[FieldSpec] = &[
    FieldSpec::new("itemDescription", "Item Description", Text),
    FieldSpec::new("estimatedValue", "Estimated Value (PKR)", Number),
];

const BANK_LOAN: &[FieldSpec] = &[
    FieldSpec::new("bankName", "Bank/Institution Name", Text),
    FieldSpec::new("loanType", "Loan Type", Text),
    FieldSpec::new("outstandingAmount", "Outstanding Amount (PKR)", Number),
];

const OTHER_LIABILITIES: &[FieldSpec] = &[
    FieldSpec::new("liabilityDescription", "Liability Description", Text),
    FieldSpec::new("amount", "Amount Owed (PKR)", Number),
];

const EXPENSE_INFO: &[FieldSpec] = &[
    FieldSpec::new("householdExpense", "Household Expenses (PKR)", Number),
    FieldSpec::new("educationExpense", "Education Expenses (PKR)", Number),
    FieldSpec::new("medicalExpense", "Medical Expenses (PKR)", Number),
    FieldSpec::new("travelExpense", "Travel Expenses (PKR)", Number),
    FieldSpec::new("otherExpenses", "Other Expenses (PKR)", Number),
];

const FBR_LOGIN: &[FieldSpec] = &[
    FieldSpec::new("irisUsername", "IRIS Username", Text).required(),
    FieldSpec::new("irisPassword", "IRIS Password", Password)
        .required()
        .hint("This is used only for submission"),
];

impl SubStepKind {
    pub fn id(&self) -> &'static str {
        match self {
            Self::BasicInfo => "basic-info",
            Self::Salary => "salary",
            Self::Pension => "pension",
            Self::Agriculture => "agriculture",
            Self::Commission => "commission",
            Self::RentProperty => "rent-property",
            Self::ProfitSavings => "profit-savings",
            Self::Dividend => "dividend",
            Self::Bonus => "bonus",
            Self::OtherIncome => "other-income",
            Self::UserCredits => "user-credits",
            Self::BankDeduction => "bank-deduction",
            Self::VehicleTax => "vehicle-tax",
            Self::Utilities => "utilities",
            Self::OtherDeductions => "other-deductions",
            Self::NetWorth => "net-worth",
            Self::Property => "property",
            Self::Vehicles => "vehicles",
            Self::BankAccounts => "bank-accounts",
            Self::Insurance => "insurance",
            Self::OtherAssets => "other-assets",
            Self::CashBalance => "cash-balance",
            Self::ForeignAssets => "foreign-assets",
            Self::Possessions => "possessions",
            Self::BankLoan => "bank-loan",
            Self::OtherLiabilities => "other-liabilities",
            Self::ExpenseInfo => "expense-info",
            Self::PersonalSummary => "personal-summary",
            Self::IncomeSummary => "income-summary",
            Self::CreditSummary => "credit-summary",
            Self::DeductedSummary => "deducted-summary",
            Self::WealthSummary => "wealth-summary",
            Self::ExpenseSummary => "expense-summary",
            Self::FbrLogin => "fbr-login",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Information",
            Self::Salary => "Salary Income",
            Self::Pension => "Pension Income",
            Self::Agriculture => "Agriculture Income",
            Self::Commission => "Commission/Services Income",
            Self::RentProperty => "Rent/Property Sale Income",
            Self::ProfitSavings => "Profit on Savings Income",
            Self::Dividend => "Dividend/Gain Income",
            Self::Bonus => "Bonus",
            Self::OtherIncome => "Other Income",
            Self::UserCredits => "User Tax Credits",
            Self::BankDeduction => "Bank Tax Deduction",
            Self::VehicleTax => "Vehicle Details",
            Self::Utilities => "Utilities Details",
            Self::OtherDeductions => "Other Tax Deductions",
            Self::NetWorth => "Net Worth Summary",
            Self::Property => "Property Details",
            Self::Vehicles => "Vehicle Details",
            Self::BankAccounts => "Bank Account Details",
            Self::Insurance => "Insurance Details",
            Self::OtherAssets => "Other Assets",
            Self::CashBalance => "Cash Balance",
            Self::ForeignAssets => "Foreign Assets Details",
            Self::Possessions => "Possessions Details",
            Self::BankLoan => "Bank Loan",
            Self::OtherLiabilities => "Other Liabilities",
            Self::ExpenseInfo => "Expense Information",
            Self::PersonalSummary => "Personal Information Summary",
            Self::IncomeSummary => "Income Information Summary",
            Self::CreditSummary => "Tax Credit Summary",
            Self::DeductedSummary => "Tax Deducted Summary",
            Self::WealthSummary => "Wealth Statement Summary",
            Self::ExpenseSummary => "Expense Summary",
            Self::FbrLogin => "FBR/IRIS Portal Login",
        }
    }

    /// Form schema for this sub-step. Kinds without a dedicated form
    /// (the summary pages) get a single optional notes field.
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Self::BasicInfo => BASIC_INFO,
            Self::Salary => SALARY,
            Self::Pension => PENSION,
            Self::Agriculture => AGRICULTURE,
            Self::Commission => COMMISSION,
            Self::RentProperty => RENT_PROPERTY,
            Self::ProfitSavings => PROFIT_SAVINGS,
            Self::Dividend => DIVIDEND,
            Self::Bonus => BONUS,
            Self::OtherIncome => OTHER_INCOME,
            Self::UserCredits => USER_CREDITS,
            Self::BankDeduction => BANK_DEDUCTION,
            Self::VehicleTax => VEHICLE_TAX,
            Self::Utilities => UTILITIES,
            Self::OtherDeductions => OTHER_DEDUCTIONS,
            Self::NetWorth => NET_WORTH,
            Self::Property => PROPERTY,
            Self::Vehicles => VEHICLES,
            Self::BankAccounts => BANK_ACCOUNTS,
            Self::Insurance => INSURANCE,
            Self::OtherAssets => OTHER_ASSETS,
            Self::CashBalance => CASH_BALANCE,
            Self::ForeignAssets => FOREIGN_ASSETS,
            Self::Possessions => POSSESSIONS,
            Self::BankLoan => BANK_LOAN,
            Self::OtherLiabilities => OTHER_LIABILITIES,
            Self::ExpenseInfo => EXPENSE_INFO,
            Self::FbrLogin => FBR_LOGIN,
            Self::PersonalSummary
            | Self::IncomeSummary
            | Self::CreditSummary
            | Self::DeductedSummary
            | Self::WealthSummary
            | Self::ExpenseSummary => DEFAULT_FIELDS,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|spec| spec.name == name)
    }
}
