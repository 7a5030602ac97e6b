use std::env::current_dir;
use std::fs::create_dir_all;

use cosmwasm_schema::{export_schema, remove_schemas, schema_for};

use p2p_loan::msg::{
    ClaimRightOwnerResponse, ClaimRightsResponse, ContractInfoResponse, CountersResponse,
    ExecuteMsg, InstantiateMsg, LoanResponse, LoanStatusResponse, LoansResponse, OfferResponse,
    OffersResponse, QueryMsg,
};
use p2p_loan::state::{Loan, Offer};

fn main() {
    let mut out_dir = current_dir().unwrap();
    out_dir.push("schema");
    create_dir_all(&out_dir).unwrap();
    remove_schemas(&out_dir).unwrap();

    export_schema(&schema_for!(InstantiateMsg), &out_dir);
    export_schema(&schema_for!(ExecuteMsg), &out_dir);
    export_schema(&schema_for!(QueryMsg), &out_dir);
    export_schema(&schema_for!(Offer), &out_dir);
    export_schema(&schema_for!(Loan), &out_dir);
    export_schema(&schema_for!(OfferResponse), &out_dir);
    export_schema(&schema_for!(OffersResponse), &out_dir);
    export_schema(&schema_for!(LoanResponse), &out_dir);
    export_schema(&schema_for!(LoansResponse), &out_dir);
    export_schema(&schema_for!(LoanStatusResponse), &out_dir);
    export_schema(&schema_for!(ClaimRightOwnerResponse), &out_dir);
    export_schema(&schema_for!(ClaimRightsResponse), &out_dir);
    export_schema(&schema_for!(CountersResponse), &out_dir);
    export_schema(&schema_for!(ContractInfoResponse), &out_dir);
}
