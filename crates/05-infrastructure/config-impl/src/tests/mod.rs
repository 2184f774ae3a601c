//! 基于文件的配置测试

mod settings_loader_tests;
