mod id;
pub use id::{AgentId, ExecutorId, TaskId};

mod labels;
pub use labels::{KeyValue, Labels};

mod task_info;
pub use task_info::TaskInfo;

mod pod_status;
pub use pod_status::PodStatus;

mod task_state;
pub use task_state::{TaskState, TaskStatusUpdate};
