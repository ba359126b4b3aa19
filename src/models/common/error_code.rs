// 统一的业务错误码
//
// 4xxx 为请求方错误，5xxx 为服务端错误，与 HTTP 状态码解耦。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 请求方错误
    BadRequest = 4000,
    ValidationFailed = 4001,
    UnknownAlgorithm = 4002,

    // 资源不存在
    ScoreNotFound = 4041,

    // 服务端错误
    InternalServerError = 5000,
    ScoringFailed = 5001,
    DatabaseError = 5002,
}
