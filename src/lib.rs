//! ScoringSystem - 考试评分服务
//!
//! 基于 Actix Web 构建的答卷自动评分服务：上游抽取服务投递答卷文本，
//! 评分流水线按算法计算成绩并持久化，向下游暴露查询与复核接口。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `processors`: 评分算法处理器
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（评分编排）
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod processors;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
