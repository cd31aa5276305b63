use std::sync::Arc;

use spreadcast::application::evaluator::OpportunityEvaluator;
use spreadcast::application::filter::CriteriaFilter;
use spreadcast::application::notification::{Dispatcher, MessageComposer};
use spreadcast::application::pipeline::Pipeline;
use spreadcast::application::registry::UserRegistry;
use spreadcast::application::stats::PipelineStats;
use spreadcast::testkit::sender::RecordingSender;

/// Pipeline over `registry` with the production filter, delivering to `sender`.
pub fn pipeline(registry: Arc<UserRegistry>, sender: RecordingSender) -> Pipeline {
    let stats = Arc::new(PipelineStats::new());
    let evaluator = OpportunityEvaluator::new(registry, Arc::new(CriteriaFilter::new()));
    let dispatcher = Dispatcher::new(
        MessageComposer::default(),
        Arc::new(sender),
        Arc::clone(&stats),
    );
    Pipeline::new(evaluator, dispatcher, stats)
}
