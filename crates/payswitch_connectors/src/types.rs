use common_enums::AttemptStatus;
use payswitch_domain_models::router_data::RouterData;

/// Pairs a deserialized connector response with the router data it answers,
/// so `TryFrom` conversions can read both when producing the final
/// `RouterData`.
pub struct ResponseRouterData<Flow, R, Request, Response> {
    pub response: R,
    pub data: RouterData<Flow, Request, Response>,
    pub http_code: u16,
    /// Status to record when the processor approved; approval itself is
    /// decided by the response conversion. Lookup flows ignore it.
    pub flow_success: AttemptStatus,
}
