mod blocking_buckets;
mod blocking_objects;

pub use blocking_buckets::{
    BlockingBucketsService, BlockingCreateBucketRequest, BlockingDeleteBucketRequest,
    BlockingListBucketsRequest,
};
pub use blocking_objects::{
    BlockingDeleteObjectRequest, BlockingGetObjectRequest, BlockingObjectsService,
    BlockingPutObjectRequest,
};
